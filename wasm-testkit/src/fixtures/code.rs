use sha2::{Digest, Sha256};
use typed_builder::TypedBuilder;
use wasm_core_types::{AccessConfig, CodeInfo};

use crate::utils::dummies::dummy_account;

/// Code metadata together with the bytecode it describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredCode {
    pub info: CodeInfo,
    pub byte_code: Vec<u8>,
}

/// Configuration of an uploaded piece of code. The code hash is derived
/// from the bytecode.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = StoredCode))]
pub struct CodeConfig {
    #[builder(default = b"\0asm\x01\0\0\0".to_vec(), setter(into))]
    pub byte_code: Vec<u8>,
    #[builder(default = dummy_account(1), setter(into))]
    pub creator: String,
    #[builder(default = AccessConfig::everybody())]
    pub instantiate_config: AccessConfig,
}

pub fn code_hash(byte_code: &[u8]) -> Vec<u8> {
    Sha256::digest(byte_code).to_vec()
}

impl From<CodeConfig> for StoredCode {
    fn from(config: CodeConfig) -> Self {
        StoredCode {
            info: CodeInfo {
                code_hash: code_hash(&config.byte_code),
                creator: config.creator,
                instantiate_config: config.instantiate_config,
            },
            byte_code: config.byte_code,
        }
    }
}
