// tests/artifact_test.rs

use chainops::artifact::{ArtifactError, ContractArtifact};
use chainops::deploy::{load_artifact, Deployment};
use ethers::abi::Token;
use ethers::types::{Address, TxHash};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Scratch directory unique to this test binary and `name`.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chainops-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_json(path: &Path, value: serde_json::Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn write_hardhat_layout(root: &Path) {
    let artifact_path = ContractArtifact::default_path(root, "Uniswap");
    write_json(
        &artifact_path,
        json!({
            "_format": "hh-sol-artifact-1",
            "contractName": "Uniswap",
            "sourceName": "contracts/Uniswap.sol",
            "abi": [{
                "type": "constructor",
                "inputs": [
                    {"name": "tokenA", "type": "address", "internalType": "address"},
                    {"name": "tokenB", "type": "address", "internalType": "address"}
                ],
                "stateMutability": "nonpayable"
            }],
            "bytecode": "0x6080604052",
            "deployedBytecode": "0x6080",
            "linkReferences": {},
            "deployedLinkReferences": {}
        }),
    );
    write_json(
        &artifact_path.with_extension("dbg.json"),
        json!({"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc123.json"}),
    );
    write_json(
        &root.join("build-info").join("abc123.json"),
        json!({
            "id": "abc123",
            "solcVersion": "0.8.20",
            "solcLongVersion": "0.8.20+commit.a1b79de6",
            "input": {"language": "Solidity", "sources": {}, "settings": {"optimizer": {"enabled": true}}},
            "output": {}
        }),
    );
}

#[test]
fn loads_hardhat_artifact_and_build_info() {
    let root = scratch("hardhat");
    write_hardhat_layout(&root);

    let artifact = ContractArtifact::load_named(&root, "Uniswap").unwrap();
    assert_eq!(artifact.contract_name, "Uniswap");
    assert_eq!(artifact.fully_qualified_name(), "contracts/Uniswap.sol:Uniswap");
    assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    assert_eq!(artifact.abi.constructor().map(|c| c.inputs.len()), Some(2));
    assert_eq!(artifact.path, root.join("contracts/Uniswap.sol/Uniswap.json"));

    let build_info = artifact.build_info().unwrap();
    assert_eq!(build_info.compiler_version(), "v0.8.20+commit.a1b79de6");
    let input: serde_json::Value = serde_json::from_str(&build_info.standard_json_input()).unwrap();
    assert_eq!(input["language"], "Solidity");
}

#[test]
fn missing_artifact_reports_read_error() {
    let root = scratch("missing");
    let err = ContractArtifact::load_named(&root, "Nope").unwrap_err();
    assert!(matches!(err, ArtifactError::Read { .. }));
}

#[test]
fn empty_bytecode_is_rejected() {
    let root = scratch("empty");
    let path = ContractArtifact::default_path(&root, "Iface");
    write_json(
        &path,
        json!({"contractName": "Iface", "sourceName": "contracts/Iface.sol", "abi": [], "bytecode": "0x"}),
    );
    let err = ContractArtifact::load(&path).unwrap_err();
    assert!(matches!(err, ArtifactError::EmptyBytecode { .. }));
}

#[test]
fn raw_bytecode_file_with_constructor_signature() {
    let root = scratch("raw");
    let bin = root.join("PythPriceOracle.bin");
    fs::write(&bin, "0x6080604052\n").unwrap();

    let artifact =
        load_artifact(Path::new("unused"), "PythPriceOracle", Some(&bin), "constructor(address pyth)").unwrap();
    assert_eq!(artifact.bytecode.len(), 5);
    assert_eq!(artifact.source_name, "contracts/PythPriceOracle.sol");
    assert_eq!(artifact.abi.constructor().map(|c| c.inputs.len()), Some(1));

    let no_args = load_artifact(Path::new("unused"), "TokenX", Some(&bin), "").unwrap();
    assert!(no_args.abi.constructor().is_none());
}

#[test]
fn raw_bytecode_must_be_hex() {
    let root = scratch("badhex");
    let bin = root.join("Bad.bin");
    fs::write(&bin, "zz-not-hex").unwrap();
    let err = ContractArtifact::from_bytecode_file(&bin, "Bad", Default::default()).unwrap_err();
    assert!(matches!(err, ArtifactError::InvalidHex { .. }));
}

#[test]
fn constructor_arguments_encode_without_prefix() {
    let deployment = Deployment {
        contract_name: "Uniswap".into(),
        address: Address::zero(),
        tx_hash: TxHash::zero(),
        block_number: None,
        gas_used: None,
        constructor_args: vec![Token::Address(Address::from_low_u64_be(1)), Token::Address(Address::from_low_u64_be(2))],
    };
    let encoded = deployment.encoded_constructor_args();
    assert_eq!(encoded.len(), 128);
    assert!(!encoded.starts_with("0x"));
    assert!(encoded.ends_with("02"));

    let empty = Deployment { constructor_args: vec![], ..deployment };
    assert_eq!(empty.encoded_constructor_args(), "");
}

// END OF FILE: tests/artifact_test.rs
