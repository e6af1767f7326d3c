#![cfg(test)]

use ark_ff::Field;
use crate::field::to_f;
use crate::gkr::circuit::{Circuit, CircuitBuilder, Layer};
use crate::gkr::prover::LayerRoundPoly;

/// Inputs of width 4, then `(x0 + x1, x2 + x3)`, then their product.
pub fn get_test_circuit() -> Circuit {
    CircuitBuilder::new(4)
        .add_layer(
            Layer::new()
                .add_addition_gate((0, 1))
                .add_addition_gate((2, 3))
        )
        .add_layer(
            Layer::new()
                .add_multiplication_gate((0, 1))
        )
        .build()
        .unwrap()
}

pub fn get_test_inputs<F: Field>() -> Vec<F> {
    to_f(&[10, 200, 20, 300])
}

/// Output layer of `get_test_circuit` over the values `[210, 320]`.
pub fn get_test_round_poly_2_vars<F: Field>() -> LayerRoundPoly<F> {
    LayerRoundPoly::new(get_test_circuit().layer(2), &[F::one()], &to_f::<F>(&[210, 320]))
}
