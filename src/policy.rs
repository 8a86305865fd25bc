/// How a stream reacts to a malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Yield the first defect as an error and stop.
    Strict,
    /// Yield defects in-band and keep going.
    Tolerant,
}

/// How sequence/quality lines are laid out in FASTQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Sequence and quality occupy exactly one line each.
    Single,
    /// Sequence/quality may span multiple lines (wrapped FASTQ).
    Multi,
}

#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub mode: Mode,
    /// Reject sequence bytes outside `ACGTN`. Only checked in strict mode.
    pub validate_alphabet: bool,
    /// Accept `acgtn` when the alphabet is validated.
    pub allow_lowercase: bool,
    /// Reject quality bytes outside printable ASCII (`!`..=`~`).
    pub validate_quality: bool,
    /// Tolerant mode stops after yielding this many defects; 0 means no limit.
    /// Ignored in strict mode.
    pub max_defects_before_abort: usize,
    pub line_mode: LineMode,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Strict,
            validate_alphabet: true,
            allow_lowercase: true,
            validate_quality: false,
            max_defects_before_abort: 0,
            line_mode: LineMode::Single,
        }
    }
}

impl StreamOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn tolerant() -> Self {
        Self {
            mode: Mode::Tolerant,
            ..Self::default()
        }
    }
}
