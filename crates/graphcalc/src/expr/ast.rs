use std::fmt;

/// Binary operators of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }

    /// Binding strength: `+ -` < `* /` < `^`.
    fn level(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Pow => 3,
        }
    }
}

/// Recognized function identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    /// `log(v)` is the natural log; `log(v, b)` is log base `b`.
    Log,
    Sqrt,
    /// `pow(base, exp)`.
    Pow,
    Abs,
}

impl Func {
    pub const ALL: [Func; 7] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Log,
        Func::Sqrt,
        Func::Pow,
        Func::Abs,
    ];

    pub fn from_name(name: &str) -> Option<Func> {
        Func::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
            Func::Pow => "pow",
            Func::Abs => "abs",
        }
    }

    /// Accepted argument counts as an inclusive range.
    pub fn arity(self) -> (usize, usize) {
        match self {
            Func::Log => (1, 2),
            Func::Pow => (2, 2),
            _ => (1, 1),
        }
    }

    pub(crate) fn arity_text(self) -> &'static str {
        match self.arity() {
            (1, 2) => "1 or 2",
            (2, 2) => "2",
            _ => "1",
        }
    }
}

/// Node of a parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Number(f64),
    /// The free variable `x`.
    Var,
    Neg(Box<Node>),
    Binary {
        op: BinOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        func: Func,
        args: Vec<Node>,
    },
}

impl Node {
    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        match self {
            Node::Number(_) | Node::Var => 1,
            Node::Neg(inner) => 1 + inner.size(),
            Node::Binary { lhs, rhs, .. } => 1 + lhs.size() + rhs.size(),
            Node::Call { args, .. } => 1 + args.iter().map(Node::size).sum::<usize>(),
        }
    }

    pub fn contains_var(&self) -> bool {
        match self {
            Node::Number(_) => false,
            Node::Var => true,
            Node::Neg(inner) => inner.contains_var(),
            Node::Binary { lhs, rhs, .. } => lhs.contains_var() || rhs.contains_var(),
            Node::Call { args, .. } => args.iter().any(Node::contains_var),
        }
    }
}

/// Immutable parsed formula.
///
/// Only `parse` builds one, so every identifier is resolved and every call
/// has a valid argument count. Inspect the tree via `root()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    root: Node,
}

impl Expression {
    pub(crate) fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True when the formula does not depend on `x`.
    pub fn is_constant(&self) -> bool {
        !self.root.contains_var()
    }
}

impl Node {
    /// Binding strength of the node as printed; negation sits above `^`.
    fn level(&self) -> u8 {
        match self {
            Node::Binary { op, .. } => op.level(),
            Node::Neg(_) => 4,
            Node::Number(_) | Node::Var | Node::Call { .. } => 5,
        }
    }
}

/// Write `node`, parenthesized only when its level is below `min`.
fn write_at(f: &mut fmt::Formatter<'_>, node: &Node, min: u8) -> fmt::Result {
    if node.level() < min {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

/// Canonical text with only the parentheses precedence requires; re-parses to
/// an equal tree at no greater nesting depth than the input had.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `{:e}` keeps huge and tiny literals short; both forms round-trip.
            Node::Number(v) if *v == 0.0 || (1e-5..1e16).contains(v) => write!(f, "{v}"),
            Node::Number(v) => write!(f, "{v:e}"),
            Node::Var => f.write_str("x"),
            Node::Neg(inner) => {
                f.write_str("-")?;
                write_at(f, inner, 4)
            }
            Node::Binary { op, lhs, rhs } => {
                let level = op.level();
                // `^` is right-assoc with a unary base; the rest are left-assoc.
                let (lhs_min, rhs_min) = match op {
                    BinOp::Pow => (4, 3),
                    _ => (level, level + 1),
                };
                write_at(f, lhs, lhs_min)?;
                write!(f, " {} ", op.symbol())?;
                write_at(f, rhs, rhs_min)
            }
            Node::Call { func, args } => {
                write!(f, "{}(", func.name())?;
                for (k, a) in args.iter().enumerate() {
                    if k > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}
