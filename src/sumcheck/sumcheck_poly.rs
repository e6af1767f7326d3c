use ark_ff::Field;

/// Trait representing the final evaluation of an oracle
/// in the sumcheck protocol.
///
/// The oracle produces a single field element after all
/// randomness values from the protocol have been applied.
pub trait OracleEvaluation<F: Field> {
    /// Computes the final evaluation given all randomness `r` used in the protocol.
    fn final_eval(&self, r: &[F]) -> F;
}

/// Prover's view of the polynomial `g` summed over the boolean hypercube.
///
/// Implementors keep their tables bound to the challenges seen so far;
/// every call to `fix_first_variable` removes one variable.
pub trait SumCheckPoly<F: Field> {
    /// Returns the number of variables still free.
    fn num_vars(&self) -> usize;

    /// Upper bound on the degree of `g` in any single variable.
    fn degree(&self) -> usize;

    /// Evaluations at `X = 0, 1, .., degree` of the round polynomial
    /// `s(X) = sum_{x in {0,1}^{n-1}} g(X, x)`.
    fn round_evaluations(&self) -> Vec<F>;

    /// Binds the first free variable to `r`.
    fn fix_first_variable(&mut self, r: F);
}
