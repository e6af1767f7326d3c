use std::marker::PhantomData;
use ark_ff::field_hashers::{DefaultFieldHasher, HashToField};
use ark_ff::{BigInteger, PrimeField};
use sha2::{Digest, Sha256};

use crate::error::{GkrError, GkrResult};

const CHALLENGE_DOMAIN: &[u8] = b"zkml-gkr/challenge";

/// Every state the transcript went through, starting with the initial one.
pub type TranscriptTrace = Vec<[u8; 32]>;

/// Fiat-Shamir transcript over a running SHA-256 state.
///
/// Each absorb hashes the previous state, a step counter and the new data.
/// Challenges are mapped into `F` with hash-to-field and absorbed right back,
/// so two consecutive challenges never coincide.
#[derive(Clone)]
pub struct Transcript<F: PrimeField> {
    state: [u8; 32],
    n_rounds: u32,
    history: TranscriptTrace,
    /// Installed by `compare_to`; the first step that deviates is kept.
    expected_history: Option<TranscriptTrace>,
    desync_at: Option<usize>,
    phantom: PhantomData<F>,
}

impl<F: PrimeField> Transcript<F> {
    pub fn new(label: &[u8]) -> Self {
        let state: [u8; 32] = Sha256::new()
            .chain_update((label.len() as u64).to_be_bytes())
            .chain_update(label)
            .finalize()
            .into();

        Self {
            state,
            n_rounds: 0,
            history: vec![state],
            expected_history: None,
            desync_at: None,
            phantom: PhantomData,
        }
    }

    fn hasher(&self) -> Sha256 {
        Sha256::new()
            .chain_update(self.state)
            .chain_update(self.n_rounds.to_be_bytes())
    }

    fn update_state(&mut self, new_state: [u8; 32]) {
        self.state = new_state;
        self.n_rounds += 1;
        self.history.push(new_state);

        if let (Some(expected), None) = (&self.expected_history, self.desync_at) {
            let step = self.history.len() - 1;
            if expected.get(step) != Some(&new_state) {
                tracing::warn!(step, "transcript diverged from the expected history");
                self.desync_at = Some(step);
            }
        }
    }

    pub fn append_message(&mut self, label: &'static [u8]) {
        self.append_bytes(label);
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        let new_state = self
            .hasher()
            .chain_update((bytes.len() as u64).to_be_bytes())
            .chain_update(bytes)
            .finalize()
            .into();
        self.update_state(new_state);
    }

    pub fn append_u64(&mut self, x: u64) {
        let new_state = self.hasher().chain_update(x.to_be_bytes()).finalize().into();
        self.update_state(new_state);
    }

    pub fn append_scalar(&mut self, scalar: &F) {
        self.append_bytes(&scalar.into_bigint().to_bytes_le());
    }

    pub fn append_scalars(&mut self, label: &'static [u8], scalars: &[F]) {
        self.append_message(label);
        self.append_u64(scalars.len() as u64);
        for scalar in scalars {
            self.append_scalar(scalar);
        }
    }

    pub fn challenge_scalar(&mut self, label: &'static [u8]) -> F {
        let hasher = <DefaultFieldHasher<Sha256> as HashToField<F>>::new(CHALLENGE_DOMAIN);

        let mut msg = self.state.to_vec();
        msg.extend(self.n_rounds.to_be_bytes());
        msg.extend(label);
        let [e]: [F; 1] = hasher.hash_to_field(&msg);

        self.append_scalar(&e);

        e
    }

    pub fn challenge_vector(&mut self, label: &'static [u8], len: usize) -> Vec<F> {
        (0..len).map(|_| self.challenge_scalar(label)).collect()
    }

    pub fn state(&self) -> [u8; 32] {
        self.state
    }

    pub fn trace(&self) -> &TranscriptTrace {
        &self.history
    }

    pub fn into_trace(self) -> TranscriptTrace {
        self.history
    }

    /// Compares every following state against `expected`, typically the
    /// prover's trace, so a protocol bug shows up where it happens.
    pub fn compare_to(&mut self, expected: TranscriptTrace) {
        let step = self.history.len() - 1;
        if expected.get(..=step) != Some(&self.history[..]) {
            self.desync_at = Some(step);
        }

        self.expected_history = Some(expected);
    }

    /// First step that deviated from the installed trace, if any.
    pub fn diverged_at(&self) -> Option<usize> {
        self.desync_at
    }

    pub fn check_sync(&self) -> GkrResult<()> {
        if let Some(step) = self.desync_at {
            return Err(GkrError::TranscriptDesync(step));
        }

        match &self.expected_history {
            Some(expected) if expected.len() != self.history.len() => Err(
                GkrError::TranscriptDesync(expected.len().min(self.history.len())),
            ),
            _ => Ok(()),
        }
    }
}
