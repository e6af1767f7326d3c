use ark_ff::PrimeField;

use crate::config::GkrConfig;
use crate::error::{GkrError, GkrResult};
use crate::gkr::circuit::Circuit;
use crate::gkr::common::LAYER_SUMCHECK_DEGREE;
use crate::gkr::proof::GKRProof;
use crate::gkr::prover::prove;
use crate::gkr::verifier::verify;
use crate::sumcheck::SumCheckProtocol;
use crate::transcript::{Transcript, TranscriptTrace};
use crate::verdict::Verdict;

/// Prover and verifier sharing one configuration. Holds no per-proof state,
/// so a single instance can serve concurrent calls.
pub struct GKRProtocol {
    config: GkrConfig,
    sum_check_protocol: SumCheckProtocol,
}

impl Default for GKRProtocol {
    fn default() -> Self {
        Self::new(GkrConfig::default())
    }
}

impl GKRProtocol {
    pub fn new(config: GkrConfig) -> Self {
        Self {
            config,
            sum_check_protocol: SumCheckProtocol::new(LAYER_SUMCHECK_DEGREE),
        }
    }

    pub fn config(&self) -> &GkrConfig {
        &self.config
    }

    fn transcript<F: PrimeField>(&self) -> Transcript<F> {
        Transcript::new(self.config.transcript_label.as_bytes())
    }

    /// Evaluates `circuit` on `inputs` and proves the result.
    pub fn prove<F: PrimeField>(&self, circuit: &Circuit, inputs: &[F]) -> GkrResult<GKRProof<F>> {
        self.prove_traced(circuit, inputs).map(|(proof, _)| proof)
    }

    /// Like `prove`, also returning every transcript state the prover went through.
    pub fn prove_traced<F: PrimeField>(
        &self,
        circuit: &Circuit,
        inputs: &[F],
    ) -> GkrResult<(GKRProof<F>, TranscriptTrace)> {
        let witness = circuit.evaluate(inputs)?;
        let mut transcript = self.transcript();

        let proof = prove(
            circuit,
            &witness,
            &self.sum_check_protocol,
            self.config.parallel_threshold,
            &mut transcript,
        )?;

        Ok((proof, transcript.into_trace()))
    }

    pub fn verify<F: PrimeField>(
        &self,
        circuit: &Circuit,
        claimed_output: &[F],
        proof: &GKRProof<F>,
    ) -> GkrResult<Verdict> {
        verify(circuit, claimed_output, proof, &self.sum_check_protocol, &mut self.transcript())
    }

    /// Verifies while replaying the prover's `trace`. Fails with
    /// `TranscriptDesync(step)` at the first state the two sides disagree on.
    pub fn verify_traced<F: PrimeField>(
        &self,
        circuit: &Circuit,
        claimed_output: &[F],
        proof: &GKRProof<F>,
        trace: TranscriptTrace,
    ) -> GkrResult<Verdict> {
        let mut transcript = self.transcript();
        transcript.compare_to(trace);

        let verdict = verify(circuit, claimed_output, proof, &self.sum_check_protocol, &mut transcript)?;

        match verdict {
            Verdict::Accept => transcript.check_sync()?,
            // a rejecting verifier stops early, only an actual divergence counts
            Verdict::Reject(_) => {
                if let Some(step) = transcript.diverged_at() {
                    return Err(GkrError::TranscriptDesync(step));
                }
            }
        }

        Ok(verdict)
    }
}
