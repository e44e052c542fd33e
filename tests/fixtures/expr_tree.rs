// @generated by astgen from the `Expr` grammar. Do not edit by hand.

/// Any `Expr` node. Dispatch with [`Expr::accept`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(Box<Binary>),
    Call(Box<Call>),
    Conditional(Box<Conditional>),
    Literal(Box<Literal>),
    Chain(Box<Chain>),
    Nil(Box<Nil>),
}

impl Expr {
    pub fn accept<R>(&self, visitor: &mut dyn ExprVisitor<R>) -> R {
        match self {
            Expr::Binary(node) => node.accept(visitor),
            Expr::Call(node) => node.accept(visitor),
            Expr::Conditional(node) => node.accept(visitor),
            Expr::Literal(node) => node.accept(visitor),
            Expr::Chain(node) => node.accept(visitor),
            Expr::Nil(node) => node.accept(visitor),
        }
    }
}

/// One operation per `Expr` variant.
pub trait ExprVisitor<R> {
    fn visit_binary(&mut self, expr: &Binary) -> R;
    fn visit_call(&mut self, expr: &Call) -> R;
    fn visit_conditional(&mut self, expr: &Conditional) -> R;
    fn visit_literal(&mut self, expr: &Literal) -> R;
    fn visit_chain(&mut self, expr: &Chain) -> R;
    fn visit_nil(&mut self, expr: &Nil) -> R;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Expr,
    pub operator: Token,
    pub right: Expr,
}

impl Binary {
    pub fn new(left: Expr, operator: Token, right: Expr) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }

    pub fn accept<R>(&self, visitor: &mut dyn ExprVisitor<R>) -> R {
        visitor.visit_binary(self)
    }
}

impl From<Binary> for Expr {
    fn from(node: Binary) -> Self {
        Expr::Binary(Box::new(node))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Expr,
    pub arguments: Vec<Expr>,
}

impl Call {
    pub fn new(callee: Expr, arguments: Vec<Expr>) -> Self {
        Self {
            callee,
            arguments,
        }
    }

    pub fn accept<R>(&self, visitor: &mut dyn ExprVisitor<R>) -> R {
        visitor.visit_call(self)
    }
}

impl From<Call> for Expr {
    fn from(node: Call) -> Self {
        Expr::Call(Box::new(node))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expr,
    pub consequent: Expr,
    pub alternative: Option<Expr>,
}

impl Conditional {
    pub fn new(condition: Expr, consequent: Expr, alternative: Option<Expr>) -> Self {
        Self {
            condition,
            consequent,
            alternative,
        }
    }

    pub fn accept<R>(&self, visitor: &mut dyn ExprVisitor<R>) -> R {
        visitor.visit_conditional(self)
    }
}

impl From<Conditional> for Expr {
    fn from(node: Conditional) -> Self {
        Expr::Conditional(Box::new(node))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: f64,
}

impl Literal {
    pub fn new(value: f64) -> Self {
        Self {
            value,
        }
    }

    pub fn accept<R>(&self, visitor: &mut dyn ExprVisitor<R>) -> R {
        visitor.visit_literal(self)
    }
}

impl From<Literal> for Expr {
    fn from(node: Literal) -> Self {
        Expr::Literal(Box::new(node))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub head: Box<Literal>,
    pub rest: Option<Box<Chain>>,
}

impl Chain {
    pub fn new(head: Literal, rest: Option<Box<Chain>>) -> Self {
        Self {
            head: Box::new(head),
            rest,
        }
    }

    pub fn accept<R>(&self, visitor: &mut dyn ExprVisitor<R>) -> R {
        visitor.visit_chain(self)
    }
}

impl From<Chain> for Expr {
    fn from(node: Chain) -> Self {
        Expr::Chain(Box::new(node))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nil {}

impl Nil {
    pub fn new() -> Self {
        Self {}
    }

    pub fn accept<R>(&self, visitor: &mut dyn ExprVisitor<R>) -> R {
        visitor.visit_nil(self)
    }
}

impl From<Nil> for Expr {
    fn from(node: Nil) -> Self {
        Expr::Nil(Box::new(node))
    }
}
