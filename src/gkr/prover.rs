use ark_ff::{Field, PrimeField};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::error::GkrResult;
use crate::gkr::circuit::{Circuit, Layer, Witness};
use crate::gkr::common::{absorb_statement, combine_claims, OUTPUT_POINT_LABEL};
use crate::gkr::proof::{GKRProof, GKRProofLayer};
use crate::mle::MultilinearPoly;
use crate::poly_utils::eq_evals;
use crate::sumcheck::{SumCheckPoly, SumCheckProtocol};
use crate::transcript::Transcript;

/// `add_i(b, c) * (W(b) + W(c)) + mul_i(b, c) * W(b) * W(c)` over `(b, c)`,
/// with the predicates already weighted by the layer above.
///
/// Bound in two phases, `b` first, then `c`. Each phase is
/// `h(x) * W(x) + s(x)` over tables as wide as the layer below:
/// phase one sums `c` out (`Layer::left_tables`), phase two fixes `b = b*`
/// and uses `h = add + W(b*) * mul`, `s = W(b*) * add`.
#[derive(Debug, Clone)]
pub struct LayerRoundPoly<F: Field> {
    layer: Layer,
    weights: Vec<F>,
    Wi_1: Vec<F>,
    h: MultilinearPoly<F>,
    s: MultilinearPoly<F>,
    Wi_1_x: MultilinearPoly<F>,
    b_star: Vec<F>,
    /// `W(b*)`, set when phase two starts.
    claimed_left: Option<F>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    min_parallel_len: usize,
}

impl<F: Field> LayerRoundPoly<F> {
    pub fn new(layer: &Layer, weights: &[F], Wi_1: &[F]) -> Self {
        assert!(Wi_1.len().is_power_of_two());
        let (h, s) = layer.left_tables(weights, Wi_1);

        let mut poly = Self {
            layer: layer.clone(),
            weights: weights.to_vec(),
            Wi_1: Wi_1.to_vec(),
            h: MultilinearPoly::from(h),
            s: MultilinearPoly::from(s),
            Wi_1_x: MultilinearPoly::from_values(Wi_1),
            b_star: Vec::with_capacity(Wi_1.len().trailing_zeros() as usize),
            claimed_left: None,
            min_parallel_len: 1 << 9,
        };
        poly.start_phase_two_if_bound();

        poly
    }

    pub fn with_parallel_threshold(mut self, min_parallel_len: usize) -> Self {
        self.min_parallel_len = min_parallel_len.max(1);
        self
    }

    fn in_phase_one(&self) -> bool {
        self.claimed_left.is_none()
    }

    fn start_phase_two_if_bound(&mut self) {
        if !self.in_phase_one() || self.h.num_vars > 0 {
            return;
        }

        let v_b = self.Wi_1_x.final_value();
        let (add, mul) = self.layer.right_tables(&self.weights, &eq_evals(&self.b_star));

        let h = add.iter().zip(&mul).map(|(a, m)| *a + v_b * m).collect::<Vec<_>>();
        let s = add.iter().map(|a| v_b * a).collect::<Vec<_>>();

        self.h = MultilinearPoly::from(h);
        self.s = MultilinearPoly::from(s);
        self.Wi_1_x = MultilinearPoly::from_values(&self.Wi_1);
        self.claimed_left = Some(v_b);
    }

    /// `(W(b*), W(c*))` once every variable is bound.
    pub fn claims(&self) -> (F, F) {
        match self.claimed_left {
            Some(v_b) => (v_b, self.Wi_1_x.final_value()),
            None => panic!("left input is not bound yet"),
        }
    }

    /// Length of the tables of the current phase.
    pub fn table_len(&self) -> usize {
        self.h.values().len()
    }

    /// Contribution of the pair `(2j, 2j + 1)` at `t = 0, 1, 2`.
    fn pair_evaluations(&self, j: usize) -> [F; 3] {
        let at = |table: &MultilinearPoly<F>| {
            let (lo, hi) = (table.values()[2 * j], table.values()[2 * j + 1]);
            [lo, hi, hi.double() - lo]
        };

        let (h, s, w) = (at(&self.h), at(&self.s), at(&self.Wi_1_x));

        [0, 1, 2].map(|t| h[t] * w[t] + s[t])
    }
}

fn add_evaluations<F: Field>(a: [F; 3], b: [F; 3]) -> [F; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

impl<F: Field> SumCheckPoly<F> for LayerRoundPoly<F> {
    fn num_vars(&self) -> usize {
        let pending = if self.in_phase_one() {
            self.Wi_1.len().trailing_zeros() as usize
        } else {
            0
        };

        self.h.num_vars + pending
    }

    fn degree(&self) -> usize {
        2
    }

    fn round_evaluations(&self) -> Vec<F> {
        let half = self.table_len() / 2;

        #[cfg(feature = "parallel")]
        let evals = (0..half)
            .into_par_iter()
            .with_min_len(self.min_parallel_len)
            .map(|j| self.pair_evaluations(j))
            .reduce(|| [F::zero(); 3], add_evaluations);
        #[cfg(not(feature = "parallel"))]
        let evals = (0..half)
            .map(|j| self.pair_evaluations(j))
            .fold([F::zero(); 3], add_evaluations);

        evals.to_vec()
    }

    fn fix_first_variable(&mut self, r: F) {
        self.h.fix_first_variable(r);
        self.s.fix_first_variable(r);
        self.Wi_1_x.fix_first_variable(r);

        if self.in_phase_one() {
            self.b_star.push(r);
            self.start_phase_two_if_bound();
        }
    }
}

/// Proves that `witness` is the evaluation of `circuit`, from the output
/// layer down to the inputs.
#[tracing::instrument(skip_all, name = "GKR::prove", fields(depth = circuit.depth()))]
pub fn prove<F: PrimeField>(
    circuit: &Circuit,
    witness: &Witness<F>,
    sum_check_protocol: &SumCheckProtocol,
    parallel_threshold: usize,
    transcript: &mut Transcript<F>,
) -> GkrResult<GKRProof<F>> {
    let depth = circuit.depth();
    let outputs = witness.output().to_vec();
    let inputs = witness.inputs().to_vec();

    absorb_statement(transcript, circuit, &inputs, &outputs)?;

    let r0 = transcript.challenge_vector(OUTPUT_POINT_LABEL, circuit.num_vars(depth));
    let mut weights = eq_evals(&r0);

    let mut gkr_proof_layers = Vec::with_capacity(depth);

    for k in (1..=depth).rev() {
        let mut sc_poly = LayerRoundPoly::new(circuit.layer(k), &weights, witness.layer(k - 1))
            .with_parallel_threshold(parallel_threshold);

        let (sumcheck_proof, used_r) = sum_check_protocol.prove(&mut sc_poly, transcript);
        let (b, c) = used_r.split_at(used_r.len() / 2);
        let (claimed_left, claimed_right) = sc_poly.claims();

        debug!(layer = k, rounds = used_r.len(), "layer reduced");

        (weights, _) = combine_claims(transcript, b, c, claimed_left, claimed_right);

        gkr_proof_layers.push(GKRProofLayer {
            sumcheck_proof,
            claimed_left,
            claimed_right,
        });
    }

    Ok(GKRProof {
        inputs,
        outputs,
        layers: gkr_proof_layers,
    })
}
