use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pbkdf2::pbkdf2_hmac;
use rand::RngExt;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const ALGORITHM: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 22;
const OUTPUT_LEN: usize = 32;
const SALT_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// PBKDF2-HMAC-SHA256 password hasher.
///
/// Encoded form: `pbkdf2_sha256$<iterations>$<salt>$<base64 hash>`. Verification
/// reads the iteration count from the stored hash, so raising `iterations` only
/// affects newly set passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn hash(&self, password: &str) -> String {
        let salt = generate_salt();
        let derived = derive(password, &salt, self.iterations);
        format!(
            "{ALGORITHM}${}${salt}${}",
            self.iterations,
            STANDARD.encode(derived)
        )
    }

    /// Constant-time check of `password` against an encoded hash. Malformed
    /// hashes never match.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let mut parts = encoded.splitn(4, '$');
        let (Some(algorithm), Some(iterations), Some(salt), Some(hash)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if algorithm != ALGORITHM {
            return false;
        }
        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        if iterations == 0 {
            return false;
        }
        let Ok(expected) = STANDARD.decode(hash) else {
            return false;
        };
        if expected.len() != OUTPUT_LEN {
            return false;
        }
        let derived = derive(password, salt, iterations);
        derived.as_slice().ct_eq(expected.as_slice()).into()
    }
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; OUTPUT_LEN] {
    let mut out = [0u8; OUTPUT_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

fn generate_salt() -> String {
    let mut rng = rand::rng();
    (0..SALT_LEN)
        .map(|_| SALT_CHARSET[rng.random_range(0..SALT_CHARSET.len())] as char)
        .collect()
}
