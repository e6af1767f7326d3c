//! Canonical byte encodings of circuits and proofs.
//!
//! Integers are little-endian `u64`, gate types a one-byte tag and field
//! elements fixed width, so equal values always encode to equal bytes.

use ark_ff::PrimeField;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use sha2::{Digest, Sha256};

use crate::error::{GkrError, GkrResult};
use crate::gkr::{Circuit, GKRProof, GKRProofLayer, Gate, GateType, Layer};
use crate::sumcheck::SumCheckProof;

const ADD_TAG: u8 = 0;
const MUL_TAG: u8 = 1;

/// Reads a `u64` length prefix and then that many items. Nothing is
/// reserved up front, so a forged prefix fails at the end of the input
/// instead of allocating.
fn deserialize_vec<T: CanonicalDeserialize, R: Read>(
    mut reader: R,
    compress: Compress,
    validate: Validate,
) -> Result<Vec<T>, SerializationError> {
    let len = u64::deserialize_with_mode(&mut reader, compress, validate)?;
    let mut items = Vec::new();
    for _ in 0..len {
        items.push(T::deserialize_with_mode(&mut reader, compress, validate)?);
    }
    Ok(items)
}

impl CanonicalSerialize for Gate {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        let tag = match self.gate_type {
            GateType::Add => ADD_TAG,
            GateType::Mul => MUL_TAG,
        };
        tag.serialize_with_mode(&mut writer, compress)?;
        (self.left as u64).serialize_with_mode(&mut writer, compress)?;
        (self.right as u64).serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, _compress: Compress) -> usize {
        1 + 2 * 8
    }
}

impl Valid for Gate {
    fn check(&self) -> Result<(), SerializationError> {
        Ok(())
    }
}

impl CanonicalDeserialize for Gate {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let gate_type = match u8::deserialize_with_mode(&mut reader, compress, validate)? {
            ADD_TAG => GateType::Add,
            MUL_TAG => GateType::Mul,
            _ => return Err(SerializationError::InvalidData),
        };
        let left = u64::deserialize_with_mode(&mut reader, compress, validate)? as usize;
        let right = u64::deserialize_with_mode(&mut reader, compress, validate)? as usize;

        Ok(Gate { gate_type, left, right })
    }
}

impl CanonicalSerialize for Layer {
    fn serialize_with_mode<W: Write>(
        &self,
        writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.gates().serialize_with_mode(writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        8 + self.gates().iter().map(|g| g.serialized_size(compress)).sum::<usize>()
    }
}

impl Valid for Layer {
    fn check(&self) -> Result<(), SerializationError> {
        Ok(())
    }
}

impl CanonicalDeserialize for Layer {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let gates = deserialize_vec::<Gate, _>(reader, compress, validate)?;

        Ok(Layer::from_gates(gates))
    }
}

impl CanonicalSerialize for Circuit {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        (self.input_size() as u64).serialize_with_mode(&mut writer, compress)?;
        self.layers().serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        8 + 8 + self.layers().iter().map(|l| l.serialized_size(compress)).sum::<usize>()
    }
}

impl Valid for Circuit {
    fn check(&self) -> Result<(), SerializationError> {
        self.validate().map_err(|_| SerializationError::InvalidData)
    }
}

impl CanonicalDeserialize for Circuit {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let input_size = u64::deserialize_with_mode(&mut reader, compress, validate)? as usize;
        let layers = deserialize_vec::<Layer, _>(&mut reader, compress, validate)?;

        // wiring is always checked, a circuit is useless otherwise
        Circuit::new(input_size, layers).map_err(|_| SerializationError::InvalidData)
    }
}

impl<F: PrimeField> Valid for SumCheckProof<F> {
    fn check(&self) -> Result<(), SerializationError> {
        self.round_polys.iter().flatten().try_for_each(|e| e.check())
    }
}

impl<F: PrimeField> CanonicalDeserialize for SumCheckProof<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let rounds = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        let mut round_polys = Vec::new();
        for _ in 0..rounds {
            round_polys.push(deserialize_vec::<F, _>(&mut reader, compress, validate)?);
        }

        Ok(SumCheckProof::new(round_polys))
    }
}

impl<F: PrimeField> Valid for GKRProofLayer<F> {
    fn check(&self) -> Result<(), SerializationError> {
        self.sumcheck_proof.check()?;
        self.claimed_left.check()?;
        self.claimed_right.check()
    }
}

impl<F: PrimeField> CanonicalDeserialize for GKRProofLayer<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        Ok(GKRProofLayer {
            sumcheck_proof: SumCheckProof::deserialize_with_mode(&mut reader, compress, validate)?,
            claimed_left: F::deserialize_with_mode(&mut reader, compress, validate)?,
            claimed_right: F::deserialize_with_mode(&mut reader, compress, validate)?,
        })
    }
}

impl<F: PrimeField> Valid for GKRProof<F> {
    fn check(&self) -> Result<(), SerializationError> {
        self.inputs.iter().chain(&self.outputs).try_for_each(|e| e.check())?;
        self.layers.iter().try_for_each(|layer| layer.check())
    }
}

impl<F: PrimeField> CanonicalDeserialize for GKRProof<F> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        Ok(GKRProof {
            inputs: deserialize_vec(&mut reader, compress, validate)?,
            outputs: deserialize_vec(&mut reader, compress, validate)?,
            layers: deserialize_vec(&mut reader, compress, validate)?,
        })
    }
}

impl Circuit {
    pub fn to_bytes(&self) -> GkrResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.compressed_size());
        self.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> GkrResult<Self> {
        Ok(Self::deserialize_compressed(bytes)?)
    }

    pub fn to_json(&self) -> GkrResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GkrError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> GkrResult<Self> {
        serde_json::from_str(json).map_err(|e| GkrError::Serialization(e.to_string()))
    }
}

impl<F: PrimeField> GKRProof<F> {
    pub fn to_bytes(&self) -> GkrResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.compressed_size());
        self.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> GkrResult<Self> {
        Ok(Self::deserialize_compressed(bytes)?)
    }

    /// Hex SHA-256 of the canonical proof bytes.
    pub fn digest_hex(&self) -> GkrResult<String> {
        Ok(hex::encode(Sha256::digest(self.to_bytes()?)))
    }
}
