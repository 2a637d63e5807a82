//! Twisted Edwards point gadgets: unified addition and validity.

use ff::PrimeField;

use super::scalar_mult::ConstantScalarMul;
use super::{Gadget, PointResult};
use crate::curve::{invert_or_zero, CurveParams};
use crate::error::{ParamsError, Result};
use crate::params::ValidityPolicy;
use crate::r1cs::{Protoboard, Variable, VariablePoint};

/// `(x3, y3) = (x1, y1) + (x2, y2)` with the unified law
///
/// ```text
/// x3 = (x1·y2 + y1·x2) / (1 + d·x1·x2·y1·y2)
/// y3 = (y1·y2 − a·x1·x2) / (1 − d·x1·x2·y1·y2)
/// ```
///
/// in 7 constraints. Passing the same point twice doubles it.
#[derive(Clone, Debug)]
pub struct PointAdder<F: PrimeField> {
    lhs: VariablePoint,
    rhs: VariablePoint,
    beta: Variable,
    gamma: Variable,
    delta: Variable,
    epsilon: Variable,
    tau: Variable,
    result: VariablePoint,
    a: F,
    d: F,
    annotation: String,
}

impl<F: PrimeField> PointAdder<F> {
    pub fn new(
        pb: &mut Protoboard<F>,
        curve: &CurveParams<F>,
        lhs: VariablePoint,
        rhs: VariablePoint,
        annotation: &str,
    ) -> Self {
        Self {
            lhs,
            rhs,
            beta: pb.allocate(format!("{}.beta", annotation)),
            gamma: pb.allocate(format!("{}.gamma", annotation)),
            delta: pb.allocate(format!("{}.delta", annotation)),
            epsilon: pb.allocate(format!("{}.epsilon", annotation)),
            tau: pb.allocate(format!("{}.tau", annotation)),
            result: VariablePoint::allocate(pb, annotation),
            a: curve.a,
            d: curve.d,
            annotation: annotation.to_owned(),
        }
    }
}

impl<F: PrimeField> PointResult for PointAdder<F> {
    fn result(&self) -> VariablePoint {
        self.result
    }
}

impl<F: PrimeField> Gadget<F> for PointAdder<F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        let (p, q) = (self.lhs, self.rhs);
        let products = [
            ("beta", p.x, q.y, self.beta),
            ("gamma", p.y, q.x, self.gamma),
            ("delta", p.y, q.y, self.delta),
            ("epsilon", p.x, q.x, self.epsilon),
            ("tau", self.delta, self.epsilon, self.tau),
        ];
        for (label, l, r, out) in products {
            pb.enforce(
                || format!("{}.{}", self.annotation, label),
                |lc| lc + l,
                |lc| lc + r,
                |lc| lc + out,
            )?;
        }

        pb.enforce(
            || format!("{}.x3", self.annotation),
            |lc| lc + self.result.x,
            |lc| lc + Variable::ONE + (self.d, self.tau),
            |lc| lc + self.beta + self.gamma,
        )?;
        pb.enforce(
            || format!("{}.y3", self.annotation),
            |lc| lc + self.result.y,
            |lc| lc + Variable::ONE - (self.d, self.tau),
            |lc| lc + self.delta - (self.a, self.epsilon),
        )
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        let p = self.lhs.value(pb)?;
        let q = self.rhs.value(pb)?;

        let beta = p.x * q.y;
        let gamma = p.y * q.x;
        let delta = p.y * q.y;
        let epsilon = p.x * q.x;
        let tau = delta * epsilon;
        let dtau = self.d * tau;

        pb.assign(self.beta, beta)?;
        pb.assign(self.gamma, gamma)?;
        pb.assign(self.delta, delta)?;
        pb.assign(self.epsilon, epsilon)?;
        pb.assign(self.tau, tau)?;
        pb.assign(self.result.x, (beta + gamma) * invert_or_zero(F::ONE + dtau))?;
        pb.assign(
            self.result.y,
            (delta - self.a * epsilon) * invert_or_zero(F::ONE - dtau),
        )
    }
}

/// Proves `a·x² + y² = 1 + d·x²·y²` for a point, and with
/// [`ValidityPolicy::PrimeOrder`] also `l·P = O`.
#[derive(Clone, Debug)]
pub struct PointValidator<F: PrimeField> {
    point: VariablePoint,
    x2: Variable,
    y2: Variable,
    x2y2: Variable,
    a: F,
    d: F,
    order_check: Option<ConstantScalarMul<F>>,
    annotation: String,
}

impl<F: PrimeField> PointValidator<F> {
    pub fn new(
        pb: &mut Protoboard<F>,
        curve: &CurveParams<F>,
        policy: ValidityPolicy,
        point: VariablePoint,
        annotation: &str,
    ) -> Result<Self> {
        let x2 = pb.allocate(format!("{}.x2", annotation));
        let y2 = pb.allocate(format!("{}.y2", annotation));
        let x2y2 = pb.allocate(format!("{}.x2y2", annotation));

        let order_check = match policy {
            ValidityPolicy::OnCurve => None,
            ValidityPolicy::PrimeOrder => {
                let order = curve
                    .order
                    .as_ref()
                    .ok_or(ParamsError::MissingSubgroupOrder)?;
                Some(ConstantScalarMul::new(
                    pb,
                    curve,
                    point,
                    order,
                    &format!("{}.order", annotation),
                )?)
            }
        };

        Ok(Self {
            point,
            x2,
            y2,
            x2y2,
            a: curve.a,
            d: curve.d,
            order_check,
            annotation: annotation.to_owned(),
        })
    }
}

impl<F: PrimeField> Gadget<F> for PointValidator<F> {
    fn emit_constraints(&self, pb: &mut Protoboard<F>) -> Result<()> {
        pb.enforce(
            || format!("{}.x2", self.annotation),
            |lc| lc + self.point.x,
            |lc| lc + self.point.x,
            |lc| lc + self.x2,
        )?;
        pb.enforce(
            || format!("{}.y2", self.annotation),
            |lc| lc + self.point.y,
            |lc| lc + self.point.y,
            |lc| lc + self.y2,
        )?;
        pb.enforce(
            || format!("{}.x2y2", self.annotation),
            |lc| lc + self.x2,
            |lc| lc + self.y2,
            |lc| lc + self.x2y2,
        )?;
        pb.enforce(
            || format!("{}.on_curve", self.annotation),
            |lc| lc + (self.a, self.x2) + self.y2 - (self.d, self.x2y2),
            |lc| lc + Variable::ONE,
            |lc| lc + Variable::ONE,
        )?;

        if let Some(check) = &self.order_check {
            check.emit_constraints(pb)?;
            let torsion = check.result();
            pb.enforce(
                || format!("{}.order.x_is_zero", self.annotation),
                |lc| lc + torsion.x,
                |lc| lc + Variable::ONE,
                |lc| lc,
            )?;
            pb.enforce(
                || format!("{}.order.y_is_one", self.annotation),
                |lc| lc + torsion.y,
                |lc| lc + Variable::ONE,
                |lc| lc + Variable::ONE,
            )?;
        }
        Ok(())
    }

    fn compute_witness(&self, pb: &mut Protoboard<F>) -> Result<()> {
        let p = self.point.value(pb)?;
        let x2 = p.x.square();
        let y2 = p.y.square();
        pb.assign(self.x2, x2)?;
        pb.assign(self.y2, y2)?;
        pb.assign(self.x2y2, x2 * y2)?;

        if let Some(check) = &self.order_check {
            check.compute_witness(pb)?;
        }
        Ok(())
    }
}
