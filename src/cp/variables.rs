//! Decision variable handles and linear expressions.
//!
//! Variables live inside a [`CpModel`](super::CpModel); the types here are
//! lightweight copyable handles into it. Booleans are integer variables
//! over `[0, 1]`.

use std::ops::{Add, Mul, Neg, Sub};

/// Handle to an integer variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(pub(crate) usize);

/// Handle to a boolean variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(pub(crate) usize);

/// Handle to an interval variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalVar(pub(crate) usize);

impl IntVar {
    /// Position in the model's variable table.
    pub fn index(self) -> usize {
        self.0
    }
}

impl BoolVar {
    /// The underlying 0/1 integer variable.
    pub fn as_int(self) -> IntVar {
        IntVar(self.0)
    }
}

impl IntervalVar {
    /// Position in the model's interval table.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Declared integer variable.
#[derive(Debug, Clone)]
pub(crate) struct VarDecl {
    pub name: String,
    pub lb: i64,
    pub ub: i64,
}

/// Declared interval: `end = start + duration`, optionally gated by `presence`.
#[derive(Debug, Clone)]
pub(crate) struct IntervalDecl {
    pub name: String,
    pub start: IntVar,
    pub end: IntVar,
    pub duration: i64,
    pub presence: Option<BoolVar>,
}

/// A linear expression `Σ coeff × var + constant`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    pub(crate) terms: Vec<(i64, IntVar)>,
    pub(crate) constant: i64,
}

impl LinearExpr {
    /// The zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// A constant expression.
    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Adds `coeff × var`.
    pub fn add_term(mut self, coeff: i64, var: IntVar) -> Self {
        self.terms.push((coeff, var));
        self
    }

    /// Adds a constant offset.
    pub fn add_constant(mut self, value: i64) -> Self {
        self.constant += value;
        self
    }

    /// Sum of variables with unit coefficients.
    pub fn sum(vars: impl IntoIterator<Item = IntVar>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (1, v)).collect(),
            constant: 0,
        }
    }

    /// Weighted sum `Σ coeff × var`.
    pub fn weighted_sum(terms: impl IntoIterator<Item = (i64, IntVar)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }

    /// Merges repeated variables and drops zero coefficients.
    pub(crate) fn normalized(mut self) -> Self {
        self.terms.sort_by_key(|&(_, v)| v);
        let mut merged: Vec<(i64, IntVar)> = Vec::with_capacity(self.terms.len());
        for (coeff, var) in self.terms {
            match merged.last_mut() {
                Some((c, v)) if *v == var => *c += coeff,
                _ => merged.push((coeff, var)),
            }
        }
        merged.retain(|&(c, _)| c != 0);
        self.terms = merged;
        self
    }

    /// Evaluates the expression under a full assignment.
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .map(|&(c, v)| c * values[v.0])
            .sum::<i64>()
            + self.constant
    }

    /// Variables referenced by the expression.
    pub fn vars(&self) -> impl Iterator<Item = IntVar> + '_ {
        self.terms.iter().map(|&(_, v)| v)
    }
}

impl From<IntVar> for LinearExpr {
    fn from(var: IntVar) -> Self {
        Self::new().add_term(1, var)
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        Self::constant(value)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(mut self) -> LinearExpr {
        for term in &mut self.terms {
            term.0 = -term.0;
        }
        self.constant = -self.constant;
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + (-rhs)
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, factor: i64) -> LinearExpr {
        for term in &mut self.terms {
            term.0 *= factor;
        }
        self.constant *= factor;
        self
    }
}
