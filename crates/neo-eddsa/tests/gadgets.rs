//! Building-block gadgets against their native counterparts.

mod common;

use ff::{Field, PrimeField, PrimeFieldBits};
use neo_eddsa::gadgets::{
    hash_to_bits, hash_to_field, ConstantScalarMul, FieldToBits, FixedBaseMul, MimcHashToBits,
    PointAdder, VariableBaseMul,
};
use neo_eddsa::presets::{self, jubjub_curve};
use neo_eddsa::{
    EdwardsPoint, Gadget, PointResult, Protoboard, ValidityPolicy, VariableArray, VariablePoint,
    MESSAGE_DOMAIN, RAM_DOMAIN,
};
use rand_core::RngCore;

use common::{field_bits, rng, F};

fn random_bits(rng: &mut impl RngCore, n: usize) -> Vec<bool> {
    (0..n).map(|_| rng.next_u32() & 1 == 1).collect()
}

fn decompose(value: F) -> anyhow::Result<(Protoboard<F>, FieldToBits)> {
    let mut pb = Protoboard::<F>::new();
    let x = pb.allocate("x");
    let gadget = FieldToBits::new(&mut pb, x, "x");
    gadget.emit_constraints(&mut pb)?;
    pb.assign(x, value)?;
    gadget.compute_witness(&mut pb)?;
    Ok((pb, gadget))
}

#[test]
fn field_to_bits_is_canonical_at_the_edges() -> anyhow::Result<()> {
    for value in [F::ZERO, F::ONE, -F::ONE, F::from(0xdead_beefu64)] {
        let (pb, gadget) = decompose(value)?;
        pb.check_satisfied()?;
        assert_eq!(gadget.result().len(), F::NUM_BITS as usize);
        assert_eq!(gadget.result().get_bits(&pb)?, field_bits(value));
    }
    Ok(())
}

#[test]
fn field_to_bits_rejects_modulus_encoding_of_zero() -> anyhow::Result<()> {
    let (mut pb, gadget) = decompose(F::ZERO)?;

    // p = (p - 1) + 1, and p - 1 is even.
    let mut modulus = field_bits(-F::ONE);
    modulus[0] = true;
    gadget.result().fill_with_bits(&mut pb, &modulus)?;

    let failing = pb.which_is_unsatisfied().unwrap_or_default().to_owned();
    assert!(!failing.is_empty());
    assert!(!failing.contains("boolean") && !failing.ends_with(".pack"), "{failing}");
    Ok(())
}

#[test]
fn point_adder_matches_native_addition() -> anyhow::Result<()> {
    let curve = jubjub_curve()?;
    let p = curve.base;
    let q = curve.base.mul_le_bits([true, true, false, true], &curve);

    for (lhs, rhs) in [(p, q), (p, p), (q, EdwardsPoint::identity())] {
        let mut pb = Protoboard::<F>::new();
        let (a, b) = (VariablePoint::allocate(&mut pb, "P"), VariablePoint::allocate(&mut pb, "Q"));
        let adder = PointAdder::new(&mut pb, &curve, a, b, "sum");
        adder.emit_constraints(&mut pb)?;
        a.assign(&mut pb, &lhs)?;
        b.assign(&mut pb, &rhs)?;
        adder.compute_witness(&mut pb)?;

        pb.check_satisfied()?;
        assert_eq!(pb.num_constraints(), 7);
        assert_eq!(adder.result().value(&pb)?, lhs.add(&rhs, &curve));
        assert!(adder.result().value(&pb)?.is_on_curve(&curve));
    }
    Ok(())
}

#[test]
fn scalar_multiplications_match_native() -> anyhow::Result<()> {
    let curve = jubjub_curve()?;
    let mut rng = rng(21);
    let point = curve.base.mul_le_bits(random_bits(&mut rng, 16), &curve);

    for len in [1usize, 2, 9, 32] {
        let scalar = random_bits(&mut rng, len);
        let mut pb = Protoboard::<F>::new();
        let bits = VariableArray::allocate(&mut pb, len, "k");
        let var_base = VariablePoint::allocate(&mut pb, "P");

        let fixed = FixedBaseMul::new(&mut pb, &curve, &curve.base, &bits, "kB")?;
        let variable = VariableBaseMul::new(&mut pb, &curve, var_base, &bits, "kP")?;
        fixed.emit_constraints(&mut pb)?;
        variable.emit_constraints(&mut pb)?;

        bits.fill_with_bits(&mut pb, &scalar)?;
        var_base.assign(&mut pb, &point)?;
        fixed.compute_witness(&mut pb)?;
        variable.compute_witness(&mut pb)?;

        pb.check_satisfied()?;
        assert_eq!(
            fixed.result().value(&pb)?,
            curve.base.mul_le_bits(scalar.iter().copied(), &curve)
        );
        assert_eq!(
            variable.result().value(&pb)?,
            point.mul_le_bits(scalar.iter().copied(), &curve)
        );
    }
    Ok(())
}

#[test]
fn empty_scalar_is_a_construction_error() -> anyhow::Result<()> {
    let curve = jubjub_curve()?;
    let mut pb = Protoboard::<F>::new();
    let p = VariablePoint::allocate(&mut pb, "P");
    let empty = VariableArray::default();

    assert!(FixedBaseMul::new(&mut pb, &curve, &curve.base, &empty, "kB").is_err());
    assert!(VariableBaseMul::new(&mut pb, &curve, p, &empty, "kP").is_err());
    assert!(ConstantScalarMul::new(&mut pb, &curve, p, &[false, false], "0P").is_err());
    Ok(())
}

#[test]
fn subgroup_order_annihilates_base() -> anyhow::Result<()> {
    let curve = jubjub_curve()?;
    let order = curve.order.clone().unwrap_or_default();
    assert_eq!(curve.base.mul_le_bits(order.iter().copied(), &curve), EdwardsPoint::identity());

    let mut pb = Protoboard::<F>::new();
    let p = VariablePoint::allocate(&mut pb, "B");
    let mul = ConstantScalarMul::new(&mut pb, &curve, p, &order, "lB")?;
    mul.emit_constraints(&mut pb)?;
    p.assign(&mut pb, &curve.base)?;
    mul.compute_witness(&mut pb)?;

    pb.check_satisfied()?;
    assert_eq!(mul.result().value(&pb)?, EdwardsPoint::identity());
    Ok(())
}

#[test]
fn mimc_gadget_matches_native_hash_across_block_boundaries() -> anyhow::Result<()> {
    let params = presets::jubjub(ValidityPolicy::OnCurve)?;
    let capacity = F::CAPACITY as usize;
    let mut rng = rng(22);

    for len in [0usize, 1, capacity, capacity + 1, 2 * capacity + 3] {
        let input = random_bits(&mut rng, len);
        let mut pb = Protoboard::<F>::new();
        let wires = VariableArray::allocate(&mut pb, len, "in");
        let hash = MimcHashToBits::new(&mut pb, &params.hash, RAM_DOMAIN, &wires, "H");
        hash.emit_constraints(&mut pb)?;
        wires.fill_with_bits(&mut pb, &input)?;
        hash.compute_witness(&mut pb)?;

        pb.check_satisfied()?;
        assert_eq!(
            pb.value_of(hash.digest())?,
            hash_to_field(&params.hash, RAM_DOMAIN, &input)
        );
        assert_eq!(
            hash.result().get_bits(&pb)?,
            hash_to_bits(&params.hash, RAM_DOMAIN, &input)
        );
    }
    Ok(())
}

#[test]
fn mimc_is_domain_and_length_separated() {
    let params = match presets::jubjub(ValidityPolicy::OnCurve) {
        Ok(params) => params,
        Err(err) => panic!("preset: {err}"),
    };
    let bits = vec![true, false, true];

    let ram = hash_to_field(&params.hash, RAM_DOMAIN, &bits);
    let msg = hash_to_field(&params.hash, MESSAGE_DOMAIN, &bits);
    assert_ne!(ram, msg);

    // Trailing zeros change the length block.
    let mut padded = bits.clone();
    padded.push(false);
    assert_ne!(ram, hash_to_field(&params.hash, RAM_DOMAIN, &padded));

    let digest = hash_to_bits(&params.hash, RAM_DOMAIN, &bits);
    assert_eq!(digest.len(), F::NUM_BITS as usize);
    let repacked: Vec<bool> = ram.to_le_bits().iter().by_vals().take(digest.len()).collect();
    assert_eq!(digest, repacked);
}
