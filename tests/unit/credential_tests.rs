// =============
// tests/unit/credential_tests.rs
// =============
use tenantry_backend::{auth::CredentialStore, config::HashingSettings};

fn store(memory_kib: u32, iterations: u32) -> CredentialStore {
    CredentialStore::new(&HashingSettings {
        memory_kib,
        iterations,
        parallelism: 1,
    })
    .unwrap()
}

#[test]
fn test_hash_is_argon2id_phc_with_configured_cost() {
    let hash = store(128, 2).hash("SecureP@ssw0rd").unwrap();

    assert!(hash.starts_with("$argon2id$v=19$"), "unexpected PHC string: {hash}");
    assert!(hash.contains("m=128,t=2,p=1"), "unexpected params: {hash}");
    assert!(!hash.contains("SecureP@ssw0rd"));
}

#[test]
fn test_hash_verifies_under_different_cost_settings() {
    // Parameters travel inside the PHC string, so a store configured with
    // other costs can still verify older hashes.
    let old = store(64, 1).hash("password").unwrap();
    let current = store(256, 3);

    assert!(current.verify("password", &old));
    assert!(!current.verify("Password", &old));
}

#[test]
fn test_unusable_hashes_never_verify() {
    let store = store(64, 1);
    for hash in ["", "plaintext", "$argon2id$v=19$m=64,t=1,p=1$broken", "password"] {
        assert!(!store.verify("password", hash), "{hash:?} verified");
    }
}
