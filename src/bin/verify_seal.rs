//! Command-line seal verification.
//!
//! Verifies a visual seal from a file against locally supplied profiles and
//! keys. Exit code 0 means valid, 1 invalid, 2 unknown/inconclusive.

use std::fs;
use std::path::PathBuf;

use seal_oxide::profile::StaticProfileResolver;
use seal_oxide::trust::InMemoryTrustStore;
use seal_oxide::{FieldSchema, RevocationList, SealVerifier, VerificationVerdict};

struct Config {
    seal_path: PathBuf,
    /// (profile number, XML path)
    profiles: Vec<(String, PathBuf)>,
    /// (certificate reference, DER key path)
    keys: Vec<(String, PathBuf)>,
    revoked: Vec<String>,
    scan_text: bool,
}

impl Config {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut seal_path = None;
        let mut profiles = Vec::new();
        let mut keys = Vec::new();
        let mut revoked = Vec::new();
        let mut scan_text = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--seal" => {
                    i += 1;
                    seal_path = Some(PathBuf::from(&args[i]));
                },
                "--profile" => {
                    i += 1;
                    profiles.push(split_pair(&args[i], "--profile"));
                },
                "--key" => {
                    i += 1;
                    keys.push(split_pair(&args[i], "--key"));
                },
                "--revoked" => {
                    i += 1;
                    revoked.push(args[i].clone());
                },
                "--text" => scan_text = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                },
                other => {
                    eprintln!("Unknown argument: {}", other);
                    print_usage();
                    std::process::exit(2);
                },
            }
            i += 1;
        }

        let seal_path = seal_path.unwrap_or_else(|| {
            eprintln!("--seal is required");
            print_usage();
            std::process::exit(2);
        });
        if profiles.is_empty() || keys.is_empty() {
            eprintln!("At least one --profile and one --key are required");
            print_usage();
            std::process::exit(2);
        }
        Config {
            seal_path,
            profiles,
            keys,
            revoked,
            scan_text,
        }
    }
}

fn split_pair(arg: &str, flag: &str) -> (String, PathBuf) {
    match arg.split_once('=') {
        Some((id, path)) => (id.to_string(), PathBuf::from(path)),
        None => {
            eprintln!("{} expects <id>=<path>, got '{}'", flag, arg);
            std::process::exit(2);
        },
    }
}

fn print_usage() {
    eprintln!("Usage: verify_seal --seal <file> --profile <nr>=<xml> --key <ref>=<der>");
    eprintln!("                   [--revoked <document-nr>]... [--text]");
    eprintln!();
    eprintln!("  --seal     Seal payload file (raw bytes, or scanner text with --text)");
    eprintln!("  --profile  Register a document profile XML under its profile number");
    eprintln!("  --key      Register a DER public key under its certificate reference");
    eprintln!("  --revoked  Mark a document number as withdrawn");
    eprintln!("  --text     Treat the seal file as scanner output text");
}

fn main() {
    env_logger::init();

    let config = Config::from_args();

    let mut profiles = StaticProfileResolver::new();
    for (nr, path) in &config.profiles {
        let xml = match fs::read_to_string(path) {
            Ok(xml) => xml,
            Err(e) => {
                eprintln!("Failed to read profile {}: {}", path.display(), e);
                std::process::exit(2);
            },
        };
        match FieldSchema::from_xml(&xml) {
            Ok(schema) => profiles.insert(nr.clone(), schema),
            Err(e) => {
                eprintln!("Failed to parse profile {}: {}", path.display(), e);
                std::process::exit(2);
            },
        }
    }

    let mut trust = InMemoryTrustStore::new();
    for (reference, path) in &config.keys {
        match fs::read(path) {
            Ok(der) => trust.insert_reference(reference.clone(), der),
            Err(e) => {
                eprintln!("Failed to read key {}: {}", path.display(), e);
                std::process::exit(2);
            },
        }
    }

    let mut validity = RevocationList::new();
    for nr in &config.revoked {
        validity.withdraw(nr.clone());
    }

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    let verdict = if config.scan_text {
        let text = match fs::read_to_string(&config.seal_path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Failed to read seal {}: {}", config.seal_path.display(), e);
                std::process::exit(2);
            },
        };
        verifier.verify_scan_text(text.trim_end_matches(['\r', '\n']))
    } else {
        let data = match fs::read(&config.seal_path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to read seal {}: {}", config.seal_path.display(), e);
                std::process::exit(2);
            },
        };
        verifier.verify_bytes(&data)
    };

    match verdict {
        VerificationVerdict::Valid(doc) => {
            println!("VALID");
            if let Some(issuer) = &doc.issuer {
                println!("  Issuer:     {}", issuer);
            }
            if let Some(date) = doc.issue_date {
                println!("  Issued on:  {}", date);
            }
            for attr in &doc.attributes {
                println!("  {}: {}", attr.name, attr.value);
            }
        },
        VerificationVerdict::Invalid { reason, detail } => {
            println!("INVALID ({})", reason.as_str());
            println!("  {}", detail);
            std::process::exit(1);
        },
        VerificationVerdict::Unknown { reason, detail } => {
            println!("UNKNOWN ({})", reason.as_str());
            println!("  {}", detail);
            std::process::exit(2);
        },
    }
}
