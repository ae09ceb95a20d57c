use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Supported digest algorithms for checksumming cleaned output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-256 checksum
    Sha256,
    /// SHA-512 checksum
    Sha512,
}

impl DigestAlgorithm {
    /// Display name as printed next to a checksum
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(format!(
                "unknown digest algorithm '{}'. Supported: sha256, sha512",
                s
            )),
        }
    }
}

/// Running hasher for the selected algorithm
enum DigestState {
    Sha256(Sha256),
    Sha512(Sha512),
}

/// Writer wrapper that hashes everything written through it
///
/// Bytes reach the hasher in the order the inner writer accepts them, so the
/// checksum always matches what was actually written.
pub struct DigestWriter<'a, W: Write> {
    inner: &'a mut W,
    state: DigestState,
}

impl<'a, W: Write> DigestWriter<'a, W> {
    /// Wrap `inner`, hashing with `algorithm` from an empty state
    pub fn new(inner: &'a mut W, algorithm: DigestAlgorithm) -> Self {
        let state = match algorithm {
            DigestAlgorithm::Sha256 => DigestState::Sha256(Sha256::new()),
            DigestAlgorithm::Sha512 => DigestState::Sha512(Sha512::new()),
        };
        DigestWriter { inner, state }
    }

    /// Finalize and return the lowercase hex checksum
    pub fn finalize(self) -> String {
        match self.state {
            DigestState::Sha256(hasher) => hex::encode(hasher.finalize()),
            DigestState::Sha512(hasher) => hex::encode(hasher.finalize()),
        }
    }
}

impl<'a, W: Write> Write for DigestWriter<'a, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // Only hash what the inner writer actually accepted
        let n = self.inner.write(buf)?;
        match &mut self.state {
            DigestState::Sha256(hasher) => hasher.update(&buf[..n]),
            DigestState::Sha512(hasher) => hasher.update(&buf[..n]),
        }
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("sha256".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Sha256));
        assert_eq!("SHA-512".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Sha512));
        assert!("md5".parse::<DigestAlgorithm>().is_err());
    }

    #[test]
    fn test_sha256_of_empty_output() {
        let mut sink: Vec<u8> = Vec::new();
        let writer = DigestWriter::new(&mut sink, DigestAlgorithm::Sha256);
        assert_eq!(
            writer.finalize(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_passes_bytes_through() {
        let mut sink: Vec<u8> = Vec::new();
        let mut writer = DigestWriter::new(&mut sink, DigestAlgorithm::Sha512);
        writer.write_all(b"CREATE TABLE t (id int);").unwrap();
        let hex_digest = writer.finalize();

        assert_eq!(sink, b"CREATE TABLE t (id int);");
        // SHA-512 produces 128 hex characters (64 bytes)
        assert_eq!(hex_digest.len(), 128);
        assert!(hex_digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
