//! mintgate tooling — entry point for drop operators and signers.
//!
//! `validate` checks a drop descriptor and prints its summary; `keygen`,
//! `sign-sale`, and `sign-claim` cover the off-chain signer service's key
//! handling: they produce exactly the assertion signatures the controller
//! verifies.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mintgate_controller::{claim_message, sale_message, DropConfig, PhaseId, RoleId};
use mintgate_crypto::{generate_keypair, keypair_from_seed, sign_message};
use mintgate_types::{Address, PrivateKey};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mintgate", about = "mintgate drop tooling")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "MINTGATE_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Parse a drop descriptor, build the controller, and print a summary.
    Validate {
        /// Path to the TOML drop descriptor.
        #[arg(long, env = "MINTGATE_CONFIG")]
        config: PathBuf,
    },
    /// Generate an Ed25519 key pair (random, or deterministic from a seed).
    Keygen {
        /// 32-byte seed in hex for deterministic derivation.
        #[arg(long)]
        seed_hex: Option<String>,
    },
    /// Sign a priced-phase eligibility assertion for a participant.
    SignSale {
        /// Collection name (as in the drop descriptor).
        #[arg(long)]
        name: String,
        #[arg(long)]
        phase: String,
        /// Participant address (mg_… hex).
        #[arg(long)]
        participant: String,
        /// Signer private key in hex.
        #[arg(long, env = "MINTGATE_SIGNER_KEY")]
        key_hex: String,
    },
    /// Sign a free-claim assertion bound to a quantity and nonce.
    SignClaim {
        #[arg(long)]
        name: String,
        #[arg(long)]
        participant: String,
        #[arg(long)]
        quantity: u64,
        #[arg(long)]
        nonce: u64,
        #[arg(long, env = "MINTGATE_SIGNER_KEY")]
        key_hex: String,
    },
}

fn parse_private_key(key_hex: &str) -> Result<PrivateKey> {
    let bytes = hex::decode(key_hex).context("private key must be hex")?;
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|_| anyhow!("private key must be 32 bytes"))?;
    Ok(PrivateKey(arr))
}

fn parse_participant(raw: &str) -> Result<Address> {
    Address::from_hex(raw).ok_or_else(|| anyhow!("invalid participant address `{raw}`"))
}

/// Same derivation the controller applies when built from a descriptor.
fn collection_id_for(name: &str) -> [u8; 32] {
    mintgate_crypto::blake2b_256_multi(&[b"mintgate.collection.v1", name.as_bytes()])
}

fn validate(path: &PathBuf) -> Result<()> {
    tracing::debug!(path = %path.display(), "loading drop descriptor");
    let config = DropConfig::load(path)?;
    let name = config.name.clone();
    let signers = config.signers.len();
    let free_signers = config.free_signers.len();
    let controller = config.build()?;
    println!("drop `{name}` is valid");
    println!("  owner:        {}", controller.owner());
    println!("  max supply:   {}", controller.max_supply());
    println!("  base URI:     {}", controller.base_uri());
    println!("  signers:      {signers} sale / {free_signers} claim");
    for (id, phase) in &controller.state().phases {
        println!(
            "  phase {:<12} start {:<12} price {:<24} {}/tx, {} tx/participant ({:?})",
            id.to_string(),
            phase.start_time.to_string(),
            phase.price_per_unit.to_string(),
            phase.max_per_tx,
            phase.max_tx_per_participant,
            phase.gate,
        );
    }
    let airdroppers = controller.state().roles.members(RoleId::Airdrop).len();
    if controller.state().delegated_airdrop {
        println!("  airdrop:      delegated to {airdroppers} holder(s)");
    } else {
        println!("  airdrop:      owner only");
    }
    Ok(())
}

fn keygen(seed_hex: Option<&str>) -> Result<()> {
    let pair = match seed_hex {
        Some(raw) => {
            let bytes = hex::decode(raw).context("seed must be hex")?;
            let seed: [u8; 32] = bytes
                .try_into()
                .map_err(|_| anyhow!("seed must be 32 bytes"))?;
            keypair_from_seed(&seed)
        }
        None => generate_keypair(),
    };
    println!("private: {}", hex::encode(pair.private.0));
    println!("public:  {}", hex::encode(pair.public.0));
    println!("address: {}", Address::from_public_key(&pair.public));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    mintgate_utils::init_tracing_with_level(&cli.log_level);

    match cli.command {
        Command::Validate { config } => validate(&config)?,
        Command::Keygen { seed_hex } => keygen(seed_hex.as_deref())?,
        Command::SignSale {
            name,
            phase,
            participant,
            key_hex,
        } => {
            let key = parse_private_key(&key_hex)?;
            let participant = parse_participant(&participant)?;
            let message =
                sale_message(&collection_id_for(&name), &PhaseId::new(phase), &participant);
            let signature = sign_message(&message, &key);
            println!("{}", hex::encode(signature.0));
        }
        Command::SignClaim {
            name,
            participant,
            quantity,
            nonce,
            key_hex,
        } => {
            let key = parse_private_key(&key_hex)?;
            let participant = parse_participant(&participant)?;
            let message =
                claim_message(&collection_id_for(&name), &participant, quantity, nonce);
            let signature = sign_message(&message, &key);
            println!("{}", hex::encode(signature.0));
        }
    }
    Ok(())
}
