use crate::error::RecordError;

/// One validated FASTQ read. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    read_id: String,
    description: Option<String>,
    sequence: Vec<u8>,
    quality: Vec<u8>,
}

impl FastqRecord {
    /// Build a record, enforcing the same invariants the parser guarantees.
    pub fn new(
        read_id: impl Into<String>,
        description: Option<String>,
        sequence: impl Into<Vec<u8>>,
        quality: impl Into<Vec<u8>>,
    ) -> Result<Self, RecordError> {
        let read_id = read_id.into();
        let sequence = sequence.into();
        let quality = quality.into();
        if read_id.is_empty() {
            return Err(RecordError::EmptyReadId);
        }
        if read_id.contains(char::is_whitespace) {
            return Err(RecordError::WhitespaceInReadId(read_id));
        }
        let description = normalize_description(description.as_deref());
        for (field, bytes) in [
            ("description", description.as_deref().map_or(&[][..], str::as_bytes)),
            ("sequence", &sequence[..]),
            ("quality", &quality[..]),
        ] {
            if bytes.iter().any(|&b| b == b'\n' || b == b'\r') {
                return Err(RecordError::LineBreak { field });
            }
        }
        if sequence.len() != quality.len() {
            return Err(RecordError::LengthMismatch {
                seq: sequence.len(),
                qual: quality.len(),
            });
        }
        Ok(Self::from_parts(read_id, description, sequence, quality))
    }

    // Caller has already checked the invariants.
    pub(crate) fn from_parts(
        read_id: String,
        description: Option<String>,
        sequence: Vec<u8>,
        quality: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(sequence.len(), quality.len());
        Self {
            read_id,
            description,
            sequence,
            quality,
        }
    }

    #[inline]
    pub fn read_id(&self) -> &str {
        &self.read_id
    }
    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    #[inline]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }
    #[inline]
    pub fn quality(&self) -> &[u8] {
        &self.quality
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Header text without the `@` sigil: read id, then description if any.
    pub fn header(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.read_id, desc),
            None => self.read_id.clone(),
        }
    }

    /// Read id with a trailing `/1` or `/2` removed.
    pub fn base_read_id(&self) -> &str {
        strip_pair_suffix(&self.read_id)
    }

    /// Mate number from a trailing `/1` or `/2`, if present.
    pub fn pair_suffix(&self) -> Option<u8> {
        match self.read_id.as_bytes() {
            [.., b'/', b'1'] => Some(1),
            [.., b'/', b'2'] => Some(2),
            _ => None,
        }
    }

    /// The same read on the opposite strand: sequence reverse-complemented,
    /// quality reversed.
    pub fn reverse_complement(&self) -> FastqRecord {
        let mut quality = self.quality.clone();
        quality.reverse();
        Self::from_parts(
            self.read_id.clone(),
            self.description.clone(),
            reverse_complement(&self.sequence),
            quality,
        )
    }

    pub fn into_parts(self) -> (String, Option<String>, Vec<u8>, Vec<u8>) {
        (self.read_id, self.description, self.sequence, self.quality)
    }
}

pub(crate) fn normalize_description(desc: Option<&str>) -> Option<String> {
    desc.map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Strip a paired-end naming suffix (`/1`, `/2`) from a read id.
pub fn strip_pair_suffix(read_id: &str) -> &str {
    read_id
        .strip_suffix("/1")
        .or_else(|| read_id.strip_suffix("/2"))
        .unwrap_or(read_id)
}

/// Reverse complement of a nucleotide sequence. Case is preserved; bytes other
/// than `ACGTN` pass through unchanged.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&b| match b {
            b'A' => b'T',
            b'C' => b'G',
            b'G' => b'C',
            b'T' => b'A',
            b'a' => b't',
            b'c' => b'g',
            b'g' => b'c',
            b't' => b'a',
            other => other,
        })
        .collect()
}
