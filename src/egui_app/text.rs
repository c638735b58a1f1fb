#![cfg(feature = "egui")]

use crate::console::MessageKind;
use eframe::egui::{self, Color32, FontId, TextFormat};
use egui::text::LayoutJob;

pub const SUCCESS_BG: Color32 = Color32::from_rgb(0xa7, 0xdc, 0xa7);
pub const ERROR_BG: Color32 = Color32::from_rgb(0xf2, 0x8b, 0x82);
pub const WARNING_BG: Color32 = Color32::from_rgb(0xff, 0xea, 0x80);
pub const PRINT_FG: Color32 = Color32::from_rgb(0x21, 0x97, 0xdb);

const COMMAND: Color32 = Color32::from_rgb(0x1f, 0x4e, 0xb4);
const PARAM: Color32 = Color32::from_rgb(0xb3, 0x5c, 0x00);
const NUMBER: Color32 = Color32::from_rgb(0x09, 0x86, 0x58);
const KEYWORD: Color32 = Color32::from_rgb(0x8a, 0x2b, 0xa8);
const COMMENT: Color32 = Color32::from_rgb(0x80, 0x80, 0x80);
const PLAIN: Color32 = Color32::from_rgb(0x20, 0x20, 0x20);

const FONT_SIZE: f32 = 13.0;

const KEYWORDS: &[&str] = &[
    "for", "in", "if", "elif", "else", "and", "or", "not", "pass", "True", "False",
];

/// Foreground and background colour of a console line.
pub fn message_colors(kind: MessageKind) -> (Color32, Color32) {
    match kind {
        MessageKind::Plain => (PLAIN, Color32::TRANSPARENT),
        MessageKind::Success => (PLAIN, SUCCESS_BG),
        MessageKind::Error => (PLAIN, ERROR_BG),
        MessageKind::Warning => (PLAIN, WARNING_BG),
        MessageKind::Print => (PRINT_FG, Color32::TRANSPARENT),
    }
}

/// Right-aligned line numbers for a gutter next to `text`.
pub fn line_numbers(text: &str) -> String {
    let count = text.lines().count().max(1);
    let width = count.to_string().len();
    (1..=count)
        .map(|n| format!("{n:>width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn fmt(color: Color32) -> TextFormat {
    TextFormat {
        font_id: FontId::monospace(FONT_SIZE),
        color,
        ..Default::default()
    }
}

/// Colour for one run of word characters.
fn word_color(word: &str) -> Color32 {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return PLAIN;
    };
    let rest = chars.as_str();
    if KEYWORDS.contains(&word) {
        KEYWORD
    } else if first.is_ascii_digit() || first == '.' {
        NUMBER
    } else if (first == 'G' || first == 'M')
        && !rest.is_empty()
        && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        COMMAND
    } else if first.is_ascii_uppercase() && rest.is_empty() {
        PARAM
    } else {
        PLAIN
    }
}

fn append_code(job: &mut LayoutJob, code: &str) {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.';
    let mut rest = code;
    while let Some(c) = rest.chars().next() {
        if is_word(c) {
            let end = rest.find(|c: char| !is_word(c)).unwrap_or(rest.len());
            let word = &rest[..end];
            // Parameter words such as `X10.5` colour the letter and the value apart.
            let mut chars = word.chars();
            let first = chars.next().unwrap_or(c);
            let tail = chars.as_str();
            if first.is_ascii_uppercase()
                && !matches!(first, 'G' | 'M')
                && !tail.is_empty()
                && tail.chars().all(|c| c.is_ascii_digit() || c == '.')
            {
                job.append(&word[..first.len_utf8()], 0.0, fmt(PARAM));
                job.append(tail, 0.0, fmt(NUMBER));
            } else {
                job.append(word, 0.0, fmt(word_color(word)));
            }
            rest = &rest[end..];
        } else {
            let len = c.len_utf8();
            job.append(&rest[..len], 0.0, fmt(PLAIN));
            rest = &rest[len..];
        }
    }
}

/// Highlight XGC (or plain G-code) for display in a read-only view.
pub fn xgc_syntax_job(script: &str) -> LayoutJob {
    let mut job = LayoutJob::default();
    for line in script.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        match body.find(';') {
            Some(pos) => {
                append_code(&mut job, &body[..pos]);
                job.append(&body[pos..], 0.0, fmt(COMMENT));
            }
            None => append_code(&mut job, body),
        }
        if !newline.is_empty() {
            job.append(newline, 0.0, fmt(PLAIN));
        }
    }
    job
}
