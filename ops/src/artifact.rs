// ops/src/artifact.rs
//! Hardhat compiler output: the per-contract artifact (ABI + bytecode) and the
//! build-info it links to (exact compiler input, used for explorer verification).

use ethers::{abi::Abi, types::Bytes};
use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {path:?} has no deployable bytecode")]
    EmptyBytecode { path: PathBuf },
    #[error("bytecode file {path:?} is not valid hex")]
    InvalidHex {
        path: PathBuf,
        #[source]
        source: hex::FromHexError,
    },
}

/// A compiled contract ready to deploy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    /// Source path relative to the project root, e.g. `contracts/Uniswap.sol`.
    pub source_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
    /// Where the artifact was loaded from; not part of the JSON.
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct DebugFile {
    #[serde(rename = "buildInfo")]
    build_info: String,
}

/// The subset of a Hardhat build-info file verification needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub solc_long_version: String,
    pub input: serde_json::Value,
}

impl BuildInfo {
    /// Compiler version in the form explorers expect (`v0.8.20+commit.a1b79de6`).
    pub fn compiler_version(&self) -> String {
        if self.solc_long_version.starts_with('v') {
            self.solc_long_version.clone()
        } else {
            format!("v{}", self.solc_long_version)
        }
    }

    /// The standard-JSON compiler input, serialized.
    pub fn standard_json_input(&self) -> String {
        self.input.to_string()
    }
}

fn read(path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| ArtifactError::Read { path: path.to_path_buf(), source })
}

fn parse<T: for<'de> Deserialize<'de>>(path: &Path, raw: &str) -> Result<T, ArtifactError> {
    serde_json::from_str(raw).map_err(|source| ArtifactError::Parse { path: path.to_path_buf(), source })
}

impl ContractArtifact {
    /// Hardhat's layout: `<artifacts>/contracts/<Name>.sol/<Name>.json`.
    pub fn default_path(artifacts_dir: &Path, contract_name: &str) -> PathBuf {
        artifacts_dir.join("contracts").join(format!("{contract_name}.sol")).join(format!("{contract_name}.json"))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let mut artifact: ContractArtifact = parse(path, &read(path)?)?;
        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode { path: path.to_path_buf() });
        }
        artifact.path = path.to_path_buf();
        Ok(artifact)
    }

    pub fn load_named(artifacts_dir: &Path, contract_name: &str) -> Result<Self, ArtifactError> {
        Self::load(Self::default_path(artifacts_dir, contract_name))
    }

    /// Builds an artifact from a raw hex bytecode file and a separately supplied ABI.
    pub fn from_bytecode_file(
        path: impl AsRef<Path>,
        contract_name: &str,
        abi: Abi,
    ) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = read(path)?;
        let cleaned = raw.trim().trim_start_matches("0x");
        let bytecode = hex::decode(cleaned)
            .map_err(|source| ArtifactError::InvalidHex { path: path.to_path_buf(), source })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode { path: path.to_path_buf() });
        }
        Ok(Self {
            contract_name: contract_name.to_string(),
            source_name: format!("contracts/{contract_name}.sol"),
            abi,
            bytecode: Bytes::from(bytecode),
            path: path.to_path_buf(),
        })
    }

    /// `contracts/Uniswap.sol:Uniswap`
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Follows the sibling `.dbg.json` to the build-info that produced this artifact.
    pub fn build_info(&self) -> Result<BuildInfo, ArtifactError> {
        let dbg_path = self.path.with_extension("dbg.json");
        let dbg: DebugFile = parse(&dbg_path, &read(&dbg_path)?)?;
        let base = dbg_path.parent().unwrap_or_else(|| Path::new("."));
        let build_info_path = base.join(dbg.build_info);
        parse(&build_info_path, &read(&build_info_path)?)
    }
}

// END OF FILE: ops/src/artifact.rs
