use indexmap::IndexMap;
use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Program
// ────────────────────────────────────────────────────────────────────────────

/// A parsed XGC script: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// One statement together with the 1-based line it came from in the
/// original editor text (before comments and blank lines were stripped).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub line: usize,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatementKind {
    /// `a = b = expr`
    Assign { targets: Vec<String>, value: Expr },
    /// `a += expr` and friends.
    AugAssign {
        target: String,
        op: BinOp,
        value: Expr,
    },
    /// A bare expression, usually a call such as `console_print(x)`.
    Expr(Expr),
    For {
        var: String,
        iter: Expr,
        body: Vec<Statement>,
    },
    If {
        branches: Vec<Branch>,
        else_body: Option<Vec<Statement>>,
    },
    Pass,
    /// A G/M command with parameters, e.g. `G01 X10 Y[5+i]`.
    Command(Command),
    /// A line made only of parameterless commands, e.g. `G17 G90 G21`.
    Modal(Vec<Code>),
    /// A bare `X.. Y..` line inside a canned cycle.
    CannedXy { x: Option<Expr>, y: Option<Expr> },
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub line: usize,
    pub condition: Expr,
    pub body: Vec<Statement>,
}

// ────────────────────────────────────────────────────────────────────────────
// Commands
// ────────────────────────────────────────────────────────────────────────────

/// A command word and its parameters in the order they were written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    pub code: Code,
    pub params: IndexMap<char, Expr>,
}

/// Every G/M code the compiler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Code {
    G00,
    G01,
    G02,
    G03,
    G04,
    G15,
    G16,
    G17,
    G18,
    G19,
    G20,
    G21,
    G80,
    #[serde(rename = "G81.1")]
    G81_1,
    G90,
    G91,
    G93,
    G94,
    M03,
    M05,
    M30,
}

impl Code {
    pub const ALL: [Code; 21] = [
        Code::G00,
        Code::G01,
        Code::G02,
        Code::G03,
        Code::G04,
        Code::G15,
        Code::G16,
        Code::G17,
        Code::G18,
        Code::G19,
        Code::G20,
        Code::G21,
        Code::G80,
        Code::G81_1,
        Code::G90,
        Code::G91,
        Code::G93,
        Code::G94,
        Code::M03,
        Code::M05,
        Code::M30,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Code::G00 => "G00",
            Code::G01 => "G01",
            Code::G02 => "G02",
            Code::G03 => "G03",
            Code::G04 => "G04",
            Code::G15 => "G15",
            Code::G16 => "G16",
            Code::G17 => "G17",
            Code::G18 => "G18",
            Code::G19 => "G19",
            Code::G20 => "G20",
            Code::G21 => "G21",
            Code::G80 => "G80",
            Code::G81_1 => "G81.1",
            Code::G90 => "G90",
            Code::G91 => "G91",
            Code::G93 => "G93",
            Code::G94 => "G94",
            Code::M03 => "M03",
            Code::M05 => "M05",
            Code::M30 => "M30",
        }
    }

    /// Look up a command word exactly as written (`G01`, `G81.1`, ...).
    pub fn from_word(word: &str) -> Option<Code> {
        Code::ALL.iter().copied().find(|c| c.as_str() == word)
    }

    /// Commands that take no parameters and may share a line with others.
    pub fn is_parameterless(self) -> bool {
        matches!(
            self,
            Code::G15
                | Code::G17
                | Code::G18
                | Code::G19
                | Code::G20
                | Code::G21
                | Code::G80
                | Code::G90
                | Code::G91
                | Code::G93
                | Code::G94
                | Code::M05
                | Code::M30
        )
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Expressions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Value),
    Name(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Compare(CmpOp, Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Call { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

// ────────────────────────────────────────────────────────────────────────────
// Values
// ────────────────────────────────────────────────────────────────────────────

/// Runtime value of an XGC expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    List(Vec<Value>),
    /// Result of calls that return nothing, e.g. `console_print`.
    None,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::None => "NoneType",
        }
    }

    /// Numeric view of the value; `None` for strings and lists.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::None => false,
        }
    }
}
