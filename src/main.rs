use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eth_typed_signer::eip712::{
    hash_typed_data_with_config, sign_typed_data_legacy, sign_typed_data_with_config,
    typed_signature_hash_buffer, LegacyTypedField, TypedData,
};
use eth_typed_signer::message_signer::personal_sign;
use eth_typed_signer::recovery::{
    recover_personal_signature, recover_typed_signature_legacy,
    recover_typed_signature_with_config,
};
use eth_typed_signer::utils::bytes::{decode_hex, to_hex};
use eth_typed_signer::{log_debug, SignerConfig, SignerError};
use serde_json::json;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Hash, sign and recover Ethereum typed data and personal messages
#[derive(Parser)]
#[command(name = "typed-signer", version)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as a JSON object
    #[arg(long, global = true)]
    json: bool,

    /// Maximum struct nesting depth
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// EIP-712 hash of a typed-data JSON file (`-` for stdin)
    HashTyped { file: PathBuf },

    /// Legacy hash of a `[{type, name, value}]` JSON file
    HashLegacy { file: PathBuf },

    /// Sign a typed-data file
    SignTyped {
        file: PathBuf,
        /// 32-byte private key as hex
        #[arg(long)]
        key: String,
        /// Treat the file as legacy typed data
        #[arg(long)]
        legacy: bool,
    },

    /// Recover the signer of a typed-data file
    RecoverTyped {
        file: PathBuf,
        #[arg(long)]
        sig: String,
        #[arg(long)]
        legacy: bool,
    },

    /// Sign a personal message (`0x` hex or UTF-8)
    PersonalSign {
        message: String,
        #[arg(long)]
        key: String,
    },

    /// Recover the signer of a personal message
    RecoverPersonal {
        message: String,
        #[arg(long)]
        sig: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let json_output = cli.json;

    match run(cli) {
        Ok(result) => {
            if json_output {
                println!("{}", json!({ "result": result }));
            } else {
                println!("{}", result);
            }
        }
        Err(err) => {
            if json_output {
                let code = err.downcast_ref::<SignerError>().map(SignerError::code);
                println!("{}", json!({ "error": format!("{:#}", err), "code": code }));
            } else {
                eprintln!("Error: {:#}", err);
            }
            std::process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<SignerConfig> {
    let mut config = SignerConfig::from_env().context("invalid environment configuration")?;
    if let Some(depth) = cli.max_depth {
        config = config.with_max_type_depth(depth);
    }
    if cli.verbose {
        config.debug_logging = true;
    }
    config.validate()?;
    config.apply_logging();
    Ok(config)
}

fn run(cli: Cli) -> Result<String> {
    let config = load_config(&cli)?;

    let output = match cli.command {
        Command::HashTyped { file } => {
            let typed_data = read_typed_data(&file)?;
            to_hex(&hash_typed_data_with_config(&typed_data, &config)?)
        }
        Command::HashLegacy { file } => {
            let fields = read_legacy(&file)?;
            to_hex(&typed_signature_hash_buffer(&fields)?)
        }
        Command::SignTyped { file, key, legacy } => {
            let private_key = read_private_key(&key)?;
            if legacy {
                sign_typed_data_legacy(&read_legacy(&file)?, &private_key)?
            } else {
                sign_typed_data_with_config(&read_typed_data(&file)?, &private_key, &config)?
            }
        }
        Command::RecoverTyped { file, sig, legacy } => {
            if legacy {
                recover_typed_signature_legacy(&read_legacy(&file)?, &sig)?
            } else {
                recover_typed_signature_with_config(&read_typed_data(&file)?, &sig, &config)?
            }
        }
        Command::PersonalSign { message, key } => {
            let private_key = read_private_key(&key)?;
            personal_sign(&private_key, &message)?
        }
        Command::RecoverPersonal { message, sig } => recover_personal_signature(&message, &sig)?,
    };

    log_debug!("cli", "command completed");
    Ok(output)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn read_typed_data(path: &Path) -> Result<TypedData> {
    let payload = read_input(path)?;
    let value: serde_json::Value = serde_json::from_str(&payload).map_err(SignerError::from)?;
    Ok(TypedData::sanitize(&value)?)
}

fn read_legacy(path: &Path) -> Result<Vec<LegacyTypedField>> {
    let payload = read_input(path)?;
    let fields: Vec<LegacyTypedField> = serde_json::from_str(&payload).map_err(SignerError::from)?;
    Ok(fields)
}

fn read_private_key(hex_key: &str) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = decode_hex(hex_key).map_err(|_| {
        SignerError::InvalidPrivateKey("private key must be hex".to_string())
    })?;
    Ok(Zeroizing::new(bytes))
}
