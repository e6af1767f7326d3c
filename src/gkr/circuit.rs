use ark_ff::Field;
use serde::{Deserialize, Serialize};

use crate::error::{GkrError, GkrResult};
use crate::poly_utils::eq_evals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateType {
    Add,
    Mul,
}

/// A gate reading two values of the previous layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gate {
    #[serde(rename = "type")]
    pub gate_type: GateType,
    pub left: usize,
    pub right: usize,
}

impl Gate {
    pub fn add(left: usize, right: usize) -> Self {
        Self { gate_type: GateType::Add, left, right }
    }

    pub fn mul(left: usize, right: usize) -> Self {
        Self { gate_type: GateType::Mul, left, right }
    }

    fn execute<F: Field>(&self, previous_layer: &[F]) -> F {
        let (a, b) = (previous_layer[self.left], previous_layer[self.right]);

        match self.gate_type {
            GateType::Add => a + b,
            GateType::Mul => a * b,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer {
    gates: Vec<Gate>,
}

impl Layer {
    pub fn new() -> Self {
        Self { gates: vec![] }
    }

    pub fn from_gates(gates: Vec<Gate>) -> Self {
        Self { gates }
    }

    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.gates.push(gate);
        self
    }

    pub fn add_addition_gate(self, (left, right): (usize, usize)) -> Self {
        self.add_gate(Gate::add(left, right))
    }

    pub fn add_multiplication_gate(self, (left, right): (usize, usize)) -> Self {
        self.add_gate(Gate::mul(left, right))
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Tables over the left input `b` once the right input is summed out,
    /// for gate weights `weights` and values `values` of the layer below:
    /// `h[b]` collects `w` of add gates and `w * V(c)` of mul gates,
    /// `s[b]` collects `w * V(c)` of add gates. Then
    /// `sum_c add(b, c) (V(b) + V(c)) + mul(b, c) V(b) V(c) = h(b) V(b) + s(b)`.
    pub fn left_tables<F: Field>(&self, weights: &[F], values: &[F]) -> (Vec<F>, Vec<F>) {
        let mut h = vec![F::zero(); values.len()];
        let mut s = vec![F::zero(); values.len()];

        for (gate, w) in self.gates.iter().zip(weights) {
            let right = values[gate.right];
            match gate.gate_type {
                GateType::Add => {
                    h[gate.left] += w;
                    s[gate.left] += *w * right;
                }
                GateType::Mul => h[gate.left] += *w * right,
            }
        }

        (h, s)
    }

    /// Add and mul predicates over the right input `c` with the left input
    /// bound, `eq_b` being the table of `eq(b*, .)` over the layer below.
    pub fn right_tables<F: Field>(&self, weights: &[F], eq_b: &[F]) -> (Vec<F>, Vec<F>) {
        let mut add = vec![F::zero(); eq_b.len()];
        let mut mul = vec![F::zero(); eq_b.len()];

        for (gate, w) in self.gates.iter().zip(weights) {
            let term = *w * eq_b[gate.left];
            match gate.gate_type {
                GateType::Add => add[gate.right] += term,
                GateType::Mul => mul[gate.right] += term,
            }
        }

        (add, mul)
    }

    /// Pads with `Add(0, 0)` gates; nothing above reads them.
    fn pad_to_power_of_two(&mut self) {
        let len = self.gates.len().max(1).next_power_of_two();
        self.gates.resize(len, Gate::add(0, 0));
    }
}

/// Transmitted form of a circuit: input width and gate layers, input side first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitDescription {
    pub input_size: usize,
    pub layers: Vec<Layer>,
}

/// Layered arithmetic circuit.
///
/// Layer 0 is the input layer of width `input_size`; `layers[k - 1]` holds
/// the gates of layer `k`, the last one being the output layer. Every width
/// is a power of two and every gate reads the layer right below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CircuitDescription", into = "CircuitDescription")]
pub struct Circuit {
    input_size: usize,
    layers: Vec<Layer>,
}

impl TryFrom<CircuitDescription> for Circuit {
    type Error = GkrError;

    fn try_from(description: CircuitDescription) -> GkrResult<Self> {
        Circuit::new(description.input_size, description.layers)
    }
}

impl From<Circuit> for CircuitDescription {
    fn from(circuit: Circuit) -> Self {
        CircuitDescription {
            input_size: circuit.input_size,
            layers: circuit.layers,
        }
    }
}

/// Values of every layer, inputs first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness<F: Field> {
    layers: Vec<Vec<F>>,
}

impl<F: Field> Witness<F> {
    pub fn layer(&self, k: usize) -> &[F] {
        &self.layers[k]
    }

    pub fn inputs(&self) -> &[F] {
        &self.layers[0]
    }

    pub fn output(&self) -> &[F] {
        self.layers.last().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }
}

fn invalid(layer: usize, gate: usize, reason: impl Into<String>) -> GkrError {
    GkrError::InvalidWiring { layer, gate, reason: reason.into() }
}

impl Circuit {
    pub fn new(input_size: usize, layers: Vec<Layer>) -> GkrResult<Self> {
        let circuit = Self { input_size, layers };
        circuit.validate()?;

        Ok(circuit)
    }

    pub fn validate(&self) -> GkrResult<()> {
        if self.layers.is_empty() {
            return Err(invalid(0, 0, "circuit has no gate layers"));
        }
        if self.input_size == 0 || !self.input_size.is_power_of_two() {
            return Err(invalid(0, self.input_size, "input width is not a power of two"));
        }

        for k in 1..=self.depth() {
            let layer = self.layer(k);
            let bottom_width = self.width(k - 1);

            if layer.is_empty() || !layer.len().is_power_of_two() {
                return Err(invalid(k, layer.len(), "layer width is not a power of two"));
            }

            for (i, gate) in layer.gates().iter().enumerate() {
                if gate.left >= bottom_width || gate.right >= bottom_width {
                    return Err(invalid(
                        k,
                        i,
                        format!(
                            "inputs ({}, {}) out of range for previous width {}",
                            gate.left, gate.right, bottom_width
                        ),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Number of gate layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Gates of layer `k >= 1`.
    pub fn layer(&self, k: usize) -> &Layer {
        &self.layers[k - 1]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn width(&self, k: usize) -> usize {
        match k {
            0 => self.input_size,
            _ => self.layers[k - 1].len(),
        }
    }

    pub fn num_vars(&self, k: usize) -> usize {
        self.width(k).trailing_zeros() as usize
    }

    pub fn output_size(&self) -> usize {
        self.width(self.depth())
    }

    /// Number of sumcheck rounds spent on layer `k`.
    pub fn rounds(&self, k: usize) -> usize {
        2 * self.num_vars(k - 1)
    }

    /// Copies `inputs` zero padded to the input width.
    pub fn pad_inputs<F: Field>(&self, inputs: &[F]) -> Vec<F> {
        let mut padded = inputs.to_vec();
        padded.resize(self.input_size.max(inputs.len()), F::zero());
        padded
    }

    #[tracing::instrument(skip_all, name = "Circuit::evaluate")]
    pub fn evaluate<F: Field>(&self, inputs: &[F]) -> GkrResult<Witness<F>> {
        self.validate()?;
        if inputs.len() != self.input_size {
            return Err(GkrError::ShapeMismatch {
                expected: self.input_size,
                actual: inputs.len(),
            });
        }

        let mut layers = vec![inputs.to_vec()];
        for layer in &self.layers {
            let previous_layer = &layers[layers.len() - 1];
            let values = layer
                .gates()
                .iter()
                .map(|gate| gate.execute(previous_layer))
                .collect::<Vec<_>>();

            layers.push(values);
        }

        Ok(Witness { layers })
    }

    /// Weighted wiring predicates of layer `k` at `(b, c)`:
    /// `add(b, c) = sum_{add gates g} w(g) * eq(b, left(g)) * eq(c, right(g))`,
    /// `mul` likewise, in time linear in the width of layer `k`.
    pub fn predicate_eval<F: Field>(&self, k: usize, weights: &[F], b: &[F], c: &[F]) -> (F, F) {
        let eq_b = eq_evals(b);
        let eq_c = eq_evals(c);

        self.layer(k)
            .gates()
            .iter()
            .zip(weights)
            .fold((F::zero(), F::zero()), |(add, mul), (gate, w)| {
                let term = *w * eq_b[gate.left] * eq_c[gate.right];
                match gate.gate_type {
                    GateType::Add => (add + term, mul),
                    GateType::Mul => (add, mul + term),
                }
            })
    }
}

/// Builds circuits layer by layer, padding every width to a power of two.
pub struct CircuitBuilder {
    input_size: usize,
    layers: Vec<Layer>,
}

impl CircuitBuilder {
    pub fn new(input_size: usize) -> Self {
        Self {
            input_size: input_size.max(1).next_power_of_two(),
            layers: vec![],
        }
    }

    pub fn add_layer(mut self, mut layer: Layer) -> Self {
        layer.pad_to_power_of_two();
        self.layers.push(layer);
        self
    }

    pub fn build(self) -> GkrResult<Circuit> {
        Circuit::new(self.input_size, self.layers)
    }

    /// `sum_i w_i * x_i` over inputs `[w_0, .., w_{n-1}, x_0, .., x_{n-1}]`:
    /// one multiplication layer, then a binary addition tree.
    pub fn inner_product(n: usize) -> GkrResult<Circuit> {
        let n = n.max(1).next_power_of_two();

        let products = (0..n).fold(Layer::new(), |layer, i| {
            layer.add_multiplication_gate((i, n + i))
        });
        let mut builder = CircuitBuilder::new(2 * n).add_layer(products);

        let mut width = n;
        while width > 1 {
            width /= 2;
            let sums = (0..width).fold(Layer::new(), |layer, i| {
                layer.add_addition_gate((2 * i, 2 * i + 1))
            });
            builder = builder.add_layer(sums);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use ark_ff::{One, Zero};
    use crate::field::{to_f, Goldilocks, F97};
    use crate::gkr::test_utils::get_test_circuit;
    use crate::poly_utils::to_boolean_point;
    use crate::mle::MultilinearPoly;
    use super::*;

    #[test]
    fn circuit_test() {
        let circuit = get_test_circuit();

        let solution = circuit.evaluate(&to_f::<Goldilocks>(&[10, 200, 20, 300])).unwrap();
        assert_eq!(solution.inputs(), to_f::<Goldilocks>(&[10, 200, 20, 300]).as_slice());
        assert_eq!(solution.layer(1), to_f::<Goldilocks>(&[210, 320]).as_slice());
        assert_eq!(solution.output(), to_f::<Goldilocks>(&[67200]).as_slice());
        assert_eq!(solution.depth(), 2);

    }

    #[test]
    fn left_and_right_tables() {
        let circuit = get_test_circuit();

        // Add(0, 1), Add(2, 3) over [10, 200, 20, 300]
        let (h, s) = circuit
            .layer(1)
            .left_tables(&[Goldilocks::one(); 2], &to_f::<Goldilocks>(&[10, 200, 20, 300]));
        assert_eq!(h, to_f::<Goldilocks>(&[1, 0, 1, 0]));
        assert_eq!(s, to_f::<Goldilocks>(&[200, 0, 300, 0]));

        // Mul(0, 1) over [210, 320]
        let (h, s) = circuit
            .layer(2)
            .left_tables(&[Goldilocks::one()], &to_f::<Goldilocks>(&[210, 320]));
        assert_eq!(h, to_f::<Goldilocks>(&[320, 0]));
        assert!(s.iter().all(|e| e.is_zero()));

        let (add, mul) = circuit
            .layer(2)
            .right_tables(&[Goldilocks::from(2u64)], &to_f::<Goldilocks>(&[3, 4]));
        assert_eq!(add, vec![Goldilocks::zero(); 2]);
        assert_eq!(mul, to_f::<Goldilocks>(&[0, 6]));
    }

    /// Dense `b + (c << n)` wiring tables of layer `k`.
    fn dense_predicates<F: Field>(circuit: &Circuit, k: usize, weights: &[F]) -> (Vec<F>, Vec<F>) {
        let n = circuit.num_vars(k - 1);
        let mut add_i = vec![F::zero(); 1 << (2 * n)];
        let mut mul_i = vec![F::zero(); 1 << (2 * n)];

        for (gate, w) in circuit.layer(k).gates().iter().zip(weights) {
            let x = gate.left | (gate.right << n);
            match gate.gate_type {
                GateType::Add => add_i[x] += w,
                GateType::Mul => mul_i[x] += w,
            }
        }

        (add_i, mul_i)
    }

    #[test]
    fn depth_one_scenario() {
        let circuit = CircuitBuilder::new(2)
            .add_layer(Layer::new().add_multiplication_gate((0, 1)))
            .build()
            .unwrap();

        let witness = circuit.evaluate(&to_f::<F97>(&[3, 5])).unwrap();
        assert_eq!(witness.output(), &[F97::from(15u64)]);
    }

    #[test]
    fn evaluation_wraps_modulus() {
        let circuit = CircuitBuilder::new(2)
            .add_layer(Layer::new().add_multiplication_gate((0, 1)))
            .build()
            .unwrap();

        let witness = circuit.evaluate(&to_f::<F97>(&[10, 20])).unwrap();
        assert_eq!(witness.output(), &[F97::from(6u64)]);
    }

    #[test]
    fn shape_mismatch() {
        let circuit = get_test_circuit();

        assert_eq!(
            circuit.evaluate(&to_f::<Goldilocks>(&[1, 2, 3])),
            Err(GkrError::ShapeMismatch { expected: 4, actual: 3 }),
        );
    }

    #[test]
    fn out_of_range_wiring() {
        let res = CircuitBuilder::new(2)
            .add_layer(Layer::new().add_addition_gate((0, 2)))
            .build();

        assert!(matches!(res, Err(GkrError::InvalidWiring { layer: 1, gate: 0, .. })));
    }

    #[test]
    fn non_power_of_two_layer() {
        let layer = Layer::from_gates(vec![Gate::add(0, 1); 3]);

        assert!(matches!(
            Circuit::new(4, vec![layer]),
            Err(GkrError::InvalidWiring { layer: 1, gate: 3, .. })
        ));
        assert!(matches!(
            Circuit::new(3, vec![Layer::new().add_addition_gate((0, 1))]),
            Err(GkrError::InvalidWiring { layer: 0, .. })
        ));
        assert!(matches!(Circuit::new(2, vec![]), Err(GkrError::InvalidWiring { .. })));
    }

    #[test]
    fn builder_pads_layers() {
        let circuit = CircuitBuilder::new(3)
            .add_layer(
                Layer::new()
                    .add_addition_gate((0, 1))
                    .add_multiplication_gate((1, 2))
                    .add_addition_gate((2, 3)),
            )
            .build()
            .unwrap();

        assert_eq!(circuit.input_size(), 4);
        assert_eq!(circuit.width(1), 4);
        assert_eq!(circuit.layer(1).gates()[3], Gate::add(0, 0));

        let inputs = circuit.pad_inputs(&to_f::<F97>(&[1, 2, 3]));
        let witness = circuit.evaluate(&inputs).unwrap();
        assert_eq!(witness.output(), to_f::<F97>(&[3, 6, 3, 2]).as_slice());
    }

    #[test]
    fn inner_product_circuit() {
        let circuit = CircuitBuilder::inner_product(4).unwrap();
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.input_size(), 8);
        assert_eq!(circuit.output_size(), 1);

        let witness = circuit.evaluate(&to_f::<Goldilocks>(&[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();
        assert_eq!(witness.output(), &[Goldilocks::from(70u64)]);
    }

    #[test]
    fn predicate_eval_extends_tables() {
        let circuit = mixed_circuit();
        let weights = to_f::<Goldilocks>(&[3, 5, 7, 11]);
        let (add_i, mul_i) = dense_predicates(&circuit, 1, &weights);
        let add_poly = MultilinearPoly::from_values(&add_i);
        let mul_poly = MultilinearPoly::from_values(&mul_i);

        let b = to_f::<Goldilocks>(&[17, 19]);
        let c = to_f::<Goldilocks>(&[23, 29]);
        let bc = [b.clone(), c.clone()].concat();

        let (add, mul) = circuit.predicate_eval(1, &weights, &b, &c);
        assert_eq!(add, add_poly.evaluate_at(&bc));
        assert_eq!(mul, mul_poly.evaluate_at(&bc));

        let b = to_boolean_point::<Goldilocks>(3, 2);
        let c = to_boolean_point::<Goldilocks>(2, 2);
        assert_eq!(circuit.predicate_eval(1, &weights, &b, &c), (Goldilocks::zero(), Goldilocks::from(5u64)));
    }

    fn mixed_circuit() -> Circuit {
        CircuitBuilder::new(4)
            .add_layer(
                Layer::new()
                    .add_addition_gate((0, 1))
                    .add_multiplication_gate((3, 2))
                    .add_multiplication_gate((1, 1))
                    .add_addition_gate((2, 0)),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn left_tables_sum_out_right_input() {
        let circuit = mixed_circuit();
        let weights = to_f::<Goldilocks>(&[3, 5, 7, 11]);
        let values = to_f::<Goldilocks>(&[2, 9, 4, 6]);
        let (add_i, mul_i) = dense_predicates(&circuit, 1, &weights);
        let (h, s) = circuit.layer(1).left_tables(&weights, &values);

        for b in 0..4 {
            let expected = (0..4)
                .map(|c| {
                    let x = b + (c << 2);
                    add_i[x] * (values[b] + values[c]) + mul_i[x] * values[b] * values[c]
                })
                .sum::<Goldilocks>();
            assert_eq!(h[b] * values[b] + s[b], expected);
        }
    }

    #[test]
    fn right_tables_extend_to_predicate_eval() {
        let circuit = mixed_circuit();
        let weights = to_f::<Goldilocks>(&[3, 5, 7, 11]);
        let b = to_f::<Goldilocks>(&[17, 19]);
        let c = to_f::<Goldilocks>(&[23, 29]);

        let (add, mul) = circuit.layer(1).right_tables(&weights, &eq_evals(&b));
        assert_eq!(add.len(), 4);
        assert_eq!(
            (
                MultilinearPoly::from_values(&add).evaluate_at(&c),
                MultilinearPoly::from_values(&mul).evaluate_at(&c),
            ),
            circuit.predicate_eval(1, &weights, &b, &c),
        );
    }

    #[test]
    fn json_round_trip() {
        let circuit = get_test_circuit();
        let json = serde_json::to_string(&circuit).unwrap();
        assert!(json.contains(r#"{"type":"Add","left":0,"right":1}"#));

        let decoded: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, circuit);

        let broken = r#"{"input_size":2,"layers":[[{"type":"Mul","left":0,"right":5}]]}"#;
        assert!(serde_json::from_str::<Circuit>(broken).is_err());
    }
}
