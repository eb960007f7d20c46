//! Test vector generator for the qoracle price-consensus engine.
//!
//! Generates `oracle_vectors.json` containing the canonical signed-message
//! encoding, mock reporter key fingerprints, and an end-to-end acceptance
//! run. Other implementations of the reporter side check their encoding
//! against these vectors.
//!
//! Usage:
//!   qoracle-testvec              # Generate oracle_vectors.json
//!   qoracle-testvec --verify     # Verify stored vectors match regenerated values

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use qoracle_crypto::blake3;
use qoracle_crypto::mock::{reporter_signers, MockVerifier};
use qoracle_oracle::canonical::canonicalize;
use qoracle_oracle::{CommitteeConfig, OracleCommittee};
use qoracle_types::{
    PriceObservation, PriceUpdateRequest, ReporterKeySet, ReporterSignature, TrustedReporterKey,
    AGGREGATE_PRICE_DECIMALS, MAX_PRICE, MAX_TIMESTAMP_SKEW, MIN_PRICE,
};

const VECTORS_PATH: &str = "tests/fixtures/oracle_vectors.json";

#[derive(Serialize, Deserialize)]
struct TestVectors {
    version: String,
    generated_by: String,
    vectors: BTreeMap<String, TestVector>,
}

#[derive(Serialize, Deserialize)]
struct TestVector {
    description: String,
    inputs: BTreeMap<String, String>,
    outputs: BTreeMap<String, String>,
}

fn canonical_vector(description: &str, price: u64, timestamp: u64) -> TestVector {
    let observation = PriceObservation::new(price, AGGREGATE_PRICE_DECIMALS, timestamp);
    let message = canonicalize(&observation);
    TestVector {
        description: description.to_string(),
        inputs: BTreeMap::from([
            ("price".to_string(), price.to_string()),
            ("decimals".to_string(), observation.decimals.to_string()),
            ("timestamp".to_string(), timestamp.to_string()),
        ]),
        outputs: BTreeMap::from([("message".to_string(), hex::encode(message.as_bytes()))]),
    }
}

fn generate_canonical_vectors() -> BTreeMap<String, TestVector> {
    let cases = [
        (
            "canonical_layout",
            "Byte order: price LE || timestamp LE",
            0x0102_0304_0506_0708,
            0x1112_1314_1516_1718,
        ),
        (
            "canonical_min_price",
            "Smallest accepted price at the first non-genesis second",
            MIN_PRICE,
            1,
        ),
        (
            "canonical_max_price",
            "Largest accepted price",
            MAX_PRICE,
            1_700_000_000,
        ),
        (
            "canonical_max_timestamp",
            "Timestamp at u64::MAX",
            5_000_000_000_000_000,
            u64::MAX,
        ),
        (
            "canonical_reference_update",
            "Reference end-to-end observation",
            5_000_000_000_000_000,
            1000,
        ),
    ];

    cases
        .into_iter()
        .map(|(name, description, price, timestamp)| {
            (
                name.to_string(),
                canonical_vector(description, price, timestamp),
            )
        })
        .collect()
}

fn generate_mock_key_vectors() -> BTreeMap<String, TestVector> {
    let mut vectors = BTreeMap::new();
    let message = canonicalize(&PriceObservation::new(
        5_000_000_000_000_000,
        AGGREGATE_PRICE_DECIMALS,
        1000,
    ));

    for (index, signer) in reporter_signers().iter().enumerate() {
        let public_key = signer.public_key();
        let signature = signer.sign(message.as_ref());
        vectors.insert(
            format!("mock_reporter_{index}"),
            TestVector {
                description: format!(
                    "Mock reporter {index}: seed [{index}; 32], signature over canonical_reference_update"
                ),
                inputs: BTreeMap::from([
                    ("seed".to_string(), hex::encode([index as u8; 32])),
                    ("message".to_string(), hex::encode(message.as_bytes())),
                ]),
                outputs: BTreeMap::from([
                    (
                        "public_key_fingerprint".to_string(),
                        hex::encode(blake3::key_fingerprint(&public_key)),
                    ),
                    (
                        "signature_hash".to_string(),
                        hex::encode(blake3::hash(&signature)),
                    ),
                ]),
            },
        );
    }

    vectors
}

fn generate_acceptance_vectors() -> BTreeMap<String, TestVector> {
    let signers = reporter_signers();
    let keys = ReporterKeySet::new(std::array::from_fn(|i| {
        TrustedReporterKey::from_bytes(signers[i].public_key())
    }));

    let mut vectors = BTreeMap::new();
    let cases: [(&str, &str, u64, u64, u64, &[u64]); 5] = [
        (
            "accept_quorum_of_four",
            "Signatures from reporters 0..=3",
            5_000_000_000_000_000,
            1000,
            1000,
            &[0, 1, 2, 3],
        ),
        (
            "reject_three_signatures",
            "Signatures from reporters 0..=2",
            5_000_000_000_000_000,
            1000,
            1000,
            &[0, 1, 2],
        ),
        (
            "reject_duplicate_signer",
            "Reporter 0 signs twice alongside 1 and 2",
            5_000_000_000_000_000,
            1000,
            1000,
            &[0, 0, 1, 2],
        ),
        (
            "accept_forward_skew_boundary",
            "Timestamp exactly MAX_TIMESTAMP_SKEW ahead of now",
            5_000_000_000_000_000,
            1000 + MAX_TIMESTAMP_SKEW,
            1000,
            &[0, 1, 2, 3],
        ),
        (
            "reject_forward_skew",
            "Timestamp one second past the forward skew bound",
            5_000_000_000_000_000,
            1000 + MAX_TIMESTAMP_SKEW + 1,
            1000,
            &[0, 1, 2, 3],
        ),
    ];

    for (name, description, price, timestamp, now, indices) in cases {
        let observation = PriceObservation::new(price, AGGREGATE_PRICE_DECIMALS, timestamp);
        let message = canonicalize(&observation);
        let signatures = indices
            .iter()
            .map(|&i| ReporterSignature::new(i, signers[i as usize].sign(message.as_ref())))
            .collect();

        let mut committee = OracleCommittee::new(CommitteeConfig::default(), MockVerifier);
        committee.initialize(keys.clone());
        let accepted =
            committee.submit_price_update(&PriceUpdateRequest::new(observation, signatures), now);

        let signer_list: Vec<String> = indices.iter().map(u64::to_string).collect();
        vectors.insert(
            name.to_string(),
            TestVector {
                description: description.to_string(),
                inputs: BTreeMap::from([
                    ("price".to_string(), price.to_string()),
                    ("timestamp".to_string(), timestamp.to_string()),
                    ("now".to_string(), now.to_string()),
                    ("signer_indices".to_string(), signer_list.join(",")),
                ]),
                outputs: BTreeMap::from([
                    ("accepted".to_string(), accepted.to_string()),
                    (
                        "history_len".to_string(),
                        committee.get_price_history().len().to_string(),
                    ),
                ]),
            },
        );
    }

    vectors
}

fn generate_all_vectors() -> TestVectors {
    let mut all_vectors = BTreeMap::new();

    all_vectors.extend(generate_canonical_vectors());
    all_vectors.extend(generate_mock_key_vectors());
    all_vectors.extend(generate_acceptance_vectors());

    TestVectors {
        version: "1.0".to_string(),
        generated_by: "qoracle-testvec".to_string(),
        vectors: all_vectors,
    }
}

fn verify_vectors(vectors: &TestVectors) -> bool {
    let regenerated = generate_all_vectors();
    let mut all_pass = true;

    for (name, expected) in &vectors.vectors {
        match regenerated.vectors.get(name) {
            Some(actual) if actual.outputs == expected.outputs => {
                info!(vector = %name, "pass");
            }
            Some(actual) => {
                error!(
                    vector = %name,
                    expected = ?expected.outputs,
                    actual = ?actual.outputs,
                    "mismatch"
                );
                all_pass = false;
            }
            None => {
                error!(vector = %name, "missing");
                all_pass = false;
            }
        }
    }

    all_pass
}

fn write_vectors(path: &Path, vectors: &TestVectors) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(vectors)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(count = vectors.vectors.len(), path = %path.display(), "generated test vectors");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qoracle_testvec=info".parse()?),
        )
        .init();

    let path = Path::new(VECTORS_PATH);
    let verify = std::env::args().any(|a| a == "--verify");

    let vectors = if verify && path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?
    } else {
        if verify {
            warn!(path = %path.display(), "no stored vectors, generating");
        }
        let vectors = generate_all_vectors();
        write_vectors(path, &vectors)?;
        vectors
    };

    if !verify_vectors(&vectors) {
        anyhow::bail!("test vector verification failed");
    }
    info!("all test vectors verified");
    Ok(())
}
