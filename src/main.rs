//! Chain Clash Server
//!
//! Demo driver for the settlement core: walks one game through the
//! whole commit-reveal lifecycle and runs a settlement sweep, logging
//! every step.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chain_clash::proof::commitment::to_uint256;
use chain_clash::{
    compute_commitment, Address, GameError, MemoryStore, RevealPayload, SettlementEngine,
    StakeDescriptor, TeamMember, VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Chain Clash Server v{}", VERSION);

    demo_game().await
}

fn member(name: &str, asset_id: u64, background: &str, traits: [i64; 5]) -> TeamMember {
    TeamMember {
        address: Address::new([0xaa; 20]),
        asset_id,
        name: name.to_string(),
        background: background.to_string(),
        traits: traits.to_vec(),
    }
}

fn reveal_for(members: &[TeamMember], salt: [u8; 32]) -> RevealPayload {
    RevealPayload {
        salt,
        asset_addresses: [members[0].address, members[1].address, members[2].address],
        asset_ids: [members[0].asset_id, members[1].asset_id, members[2].asset_id],
        backgrounds: [
            members[0].background.clone(),
            members[1].background.clone(),
            members[2].background.clone(),
        ],
    }
}

/// Run one scripted game end to end.
async fn demo_game() -> Result<()> {
    info!("=== Starting Demo Game ===");

    let engine = SettlementEngine::new(MemoryStore::new());

    let alice = Address::new([0x01; 20]);
    let bob = Address::new([0x02; 20]);

    let team1 = vec![
        member("Aldric", 1, "Gold", [12, 8, 6, 9, 11]),
        member("Brakka", 2, "Forest", [7, 11, 9, 5, 8]),
        member("Cinder", 3, "Dune", [10, 6, 7, 10, 9]),
    ];
    let team2 = vec![
        member("Dorn", 4, "Mist", [9, 9, 8, 8, 10]),
        member("Erisa", 5, "Silver", [11, 7, 6, 10, 7]),
        member("Fenwick", 6, "Forest", [6, 12, 10, 4, 9]),
    ];

    let stake = StakeDescriptor {
        token: "0x0000000000000000000000000000000000000042".to_string(),
        amount: "1000000000000000000".to_string(),
    };

    // Each player commits to (salt, asset addresses, asset ids) up front.
    let salt1 = to_uint256(0x5eed_0001);
    let salt2 = to_uint256(0x5eed_0002);
    let c1 = compute_commitment(
        &salt1,
        &team1.iter().map(|m| m.address).collect::<Vec<_>>(),
        &team1.iter().map(|m| m.asset_id).collect::<Vec<_>>(),
    )?;
    let c2 = compute_commitment(
        &salt2,
        &team2.iter().map(|m| m.address).collect::<Vec<_>>(),
        &team2.iter().map(|m| m.asset_id).collect::<Vec<_>>(),
    )?;

    let game = engine.create_game(alice, stake, team1.clone(), c1).await?;
    info!("Game {} created by {} ({:?})", game.id, alice, game.phase());

    let game = engine.join_game(game.id, bob, team2.clone(), c2).await?;
    info!("Game {} joined by {} ({:?})", game.id, bob, game.phase());

    // Settlement before both reveals must be refused.
    match engine.settle_game(game.id).await {
        Err(GameError::NotReady) => info!("Early settlement correctly refused: not ready"),
        other => anyhow::bail!("expected NotReady, got {:?}", other.map(|g| g.phase())),
    }

    let game = engine
        .record_reveal(game.id, alice, reveal_for(&team1, salt1))
        .await?;
    info!("Player 1 revealed ({:?})", game.phase());

    let game = engine
        .record_reveal(game.id, bob, reveal_for(&team2, salt2))
        .await?;
    info!("Player 2 revealed ({:?})", game.phase());

    // The sweep picks up the eligible game instead of a direct settle call.
    let settled = engine.settle_eligible().await?;
    info!("Sweep settled games: {:?}", settled);

    let game = engine.game(game.id).await?;
    info!("=== Game Results ===");
    match game.winner {
        Some(winner) => info!("Winner: {}", winner),
        None => info!("Outcome: tie"),
    }
    info!("Settled at: {:?}", game.settled_at);

    // Retry is observed, not re-executed.
    match engine.settle_game(game.id).await {
        Err(GameError::AlreadySettled) => info!("Retry correctly observed AlreadySettled"),
        other => anyhow::bail!("expected AlreadySettled, got {:?}", other.map(|g| g.phase())),
    }

    Ok(())
}
