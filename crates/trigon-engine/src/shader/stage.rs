use std::fmt;

/// Capacity of a compiler or linker log, in bytes.
///
/// Longer logs are truncated on a character boundary.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
        }
    }

    /// WGSL attribute marking an entry point of this stage.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Vertex => "@vertex",
            Self::Fragment => "@fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Truncates a diagnostic log to [`INFO_LOG_CAPACITY`] bytes.
///
/// An empty log is replaced by a placeholder so a failure always carries text.
pub fn cap_log(mut log: String) -> String {
    if log.len() > INFO_LOG_CAPACITY {
        let mut end = INFO_LOG_CAPACITY;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }

    if log.trim().is_empty() {
        return "no diagnostic output".to_string();
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_log_is_kept() {
        assert_eq!(cap_log("error: x".into()), "error: x");
    }

    #[test]
    fn long_log_is_truncated_to_capacity() {
        let log = "e".repeat(INFO_LOG_CAPACITY * 3);
        assert_eq!(cap_log(log).len(), INFO_LOG_CAPACITY);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; 511 ASCII bytes put its second byte at index 512.
        let log = format!("{}é tail", "a".repeat(INFO_LOG_CAPACITY - 1));
        let capped = cap_log(log);
        assert_eq!(capped.len(), INFO_LOG_CAPACITY - 1);
        assert!(capped.chars().all(|c| c == 'a'));
    }

    #[test]
    fn empty_log_gets_placeholder() {
        assert_eq!(cap_log("  \n".into()), "no diagnostic output");
    }
}
