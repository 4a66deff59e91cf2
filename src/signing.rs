// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Signing of encoded documents.
//!
//! The codec treats signing as an external collaborator behind the
//! [`Signer`] and [`Verifier`] traits. [`Keyring`] is the bundled
//! implementation: named Ed25519 identities with base64 signatures.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::stego::StegoError;

/// Produces a signature over document content on behalf of an identity.
pub trait Signer {
    /// # Errors
    /// [`StegoError::SignatureUnavailable`] if no private key is held for
    /// `identity`.
    fn sign(&self, identity: &str, content: &str) -> Result<String, StegoError>;
}

/// Checks a signature and names the signer.
pub trait Verifier {
    /// The identity whose key verifies `signature` over `content`, if any.
    fn verify(&self, content: &str, signature: &str) -> Option<String>;
}

/// An encoded document with its detached signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPackage {
    pub content: String,
    pub signature: String,
    pub signer: String,
}

impl SignedPackage {
    pub fn to_json(&self) -> Result<String, StegoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StegoError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Verify the package with `verifier`, returning the signer identity.
    pub fn verify_with(&self, verifier: &impl Verifier) -> Option<String> {
        verifier.verify(&self.content, &self.signature)
    }
}

/// Ed25519 identities.
///
/// Private keys are only needed to sign; verification tries every known
/// public key.
#[derive(Default)]
pub struct Keyring {
    signing: BTreeMap<String, SigningKey>,
    verifying: BTreeMap<String, VerifyingKey>,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh key pair for `identity`, returning its public key.
    pub fn generate(&mut self, identity: &str) -> [u8; 32] {
        let key = SigningKey::generate(&mut rand::thread_rng());
        let public = key.verifying_key();
        self.signing.insert(identity.to_string(), key);
        self.verifying.insert(identity.to_string(), public);
        public.to_bytes()
    }

    /// Add a key pair derived from a 32-byte secret seed.
    pub fn insert_seed(&mut self, identity: &str, seed: Zeroizing<[u8; 32]>) -> [u8; 32] {
        let key = SigningKey::from_bytes(&seed);
        let public = key.verifying_key();
        self.signing.insert(identity.to_string(), key);
        self.verifying.insert(identity.to_string(), public);
        public.to_bytes()
    }

    /// Add a verify-only identity.
    ///
    /// # Errors
    /// [`StegoError::InvalidPayload`] if `public` is not a valid curve point.
    pub fn insert_public(&mut self, identity: &str, public: &[u8; 32]) -> Result<(), StegoError> {
        let key = VerifyingKey::from_bytes(public)
            .map_err(|_| StegoError::InvalidPayload("invalid Ed25519 public key".into()))?;
        self.verifying.insert(identity.to_string(), key);
        Ok(())
    }

    pub fn public_key(&self, identity: &str) -> Option<[u8; 32]> {
        self.verifying.get(identity).map(VerifyingKey::to_bytes)
    }

    /// The secret seed of `identity`, for export.
    pub fn export_seed(&self, identity: &str) -> Option<Zeroizing<[u8; 32]>> {
        self.signing.get(identity).map(|k| Zeroizing::new(k.to_bytes()))
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.verifying.keys().map(String::as_str)
    }
}

impl Signer for Keyring {
    fn sign(&self, identity: &str, content: &str) -> Result<String, StegoError> {
        let key = self
            .signing
            .get(identity)
            .ok_or_else(|| StegoError::SignatureUnavailable(identity.to_string()))?;
        Ok(STANDARD.encode(key.sign(content.as_bytes()).to_bytes()))
    }
}

impl Verifier for Keyring {
    fn verify(&self, content: &str, signature: &str) -> Option<String> {
        let bytes = STANDARD.decode(signature).ok()?;
        let signature = Signature::from_slice(&bytes).ok()?;
        self.verifying
            .iter()
            .find(|(_, key)| key.verify(content.as_bytes(), &signature).is_ok())
            .map(|(identity, _)| identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let mut keyring = Keyring::new();
        keyring.generate("alice");
        let signature = keyring.sign("alice", "some content").unwrap();
        assert_eq!(keyring.verify("some content", &signature).as_deref(), Some("alice"));
        assert_eq!(keyring.verify("some contend", &signature), None);
    }

    #[test]
    fn missing_private_key() {
        let keyring = Keyring::new();
        assert!(matches!(
            keyring.sign("bob", "x"),
            Err(StegoError::SignatureUnavailable(id)) if id == "bob"
        ));
    }

    #[test]
    fn verify_only_identity() {
        let mut signer = Keyring::new();
        let public = signer.insert_seed("carol", Zeroizing::new([7u8; 32]));
        let signature = signer.sign("carol", "doc").unwrap();

        let mut verifier = Keyring::new();
        verifier.insert_public("carol", &public).unwrap();
        assert_eq!(verifier.verify("doc", &signature).as_deref(), Some("carol"));
        assert!(matches!(verifier.sign("carol", "doc"), Err(StegoError::SignatureUnavailable(_))));
    }

    #[test]
    fn seed_is_deterministic() {
        let mut a = Keyring::new();
        let mut b = Keyring::new();
        let pa = a.insert_seed("x", Zeroizing::new([1u8; 32]));
        let pb = b.insert_seed("x", Zeroizing::new([1u8; 32]));
        assert_eq!(pa, pb);
        assert_eq!(a.sign("x", "m").unwrap(), b.sign("x", "m").unwrap());
        assert_eq!(*a.export_seed("x").unwrap(), [1u8; 32]);
    }

    #[test]
    fn garbage_signatures_are_rejected() {
        let mut keyring = Keyring::new();
        keyring.generate("alice");
        assert_eq!(keyring.verify("doc", "not base64!"), None);
        assert_eq!(keyring.verify("doc", &STANDARD.encode([0u8; 10])), None);
    }

    #[test]
    fn package_json_roundtrip() {
        let package = SignedPackage {
            content: "text".into(),
            signature: "c2ln".into(),
            signer: "alice".into(),
        };
        let json = package.to_json().unwrap();
        assert_eq!(SignedPackage::from_json(&json).unwrap(), package);
        assert!(matches!(SignedPackage::from_json("{"), Err(StegoError::InvalidPayload(_))));
    }
}
