/// Simulates a short play session: experience awards, equipment changes,
/// and stat-point allocation, printing the progression after each turn.

use progression_engine::core::mental::mental_status_for_level;
use progression_engine::core::progression::{add_experience, apply_level_progression};
use progression_engine::schema::config::LevelingConfig;
use progression_engine::schema::object::{GameObject, ObjectMap, StatBonuses};
use progression_engine::schema::player::{CoreStat, Player};

fn main() {
    let config = LevelingConfig::parse_json(include_str!("../tests/fixtures/leveling.json"))
        .expect("fixture config is valid");

    let mut objects = ObjectMap::default();
    objects.insert(
        "cracked-lens".to_string(),
        GameObject {
            id: "cracked-lens".to_string(),
            name: Some("Cracked Lens".to_string()),
            bonuses: StatBonuses {
                focus: 2.0,
                ..Default::default()
            },
        },
    );

    let mut player = Player::default();
    player.stats.max_health = 100.0;
    player.stats.health = 100.0;
    player.stats.max_energy = 50.0;
    player.stats.energy = 50.0;

    // Session-start observation: seeds the stat peaks.
    apply_level_progression(&mut player, &config, Some(&objects)).expect("seed call");

    let turns: [(&str, f64); 4] = [
        ("a quiet look around the room", 20.0),
        ("a tense conversation", 85.0),
        ("an escape through the vents", 150.0),
        ("the confrontation upstairs", 400.0),
    ];

    for (label, amount) in turns {
        let result = add_experience(&mut player, amount, &config).expect("award experience");
        report(&config, &player, label, result.levels_gained);
    }

    player.equipped.push("cracked-lens".to_string());
    let result =
        apply_level_progression(&mut player, &config, Some(&objects)).expect("equip check");
    report(&config, &player, "equipping the cracked lens", result.levels_gained);

    while player.stats.unspent_stat_points > 0 {
        player.stats.allocate_stat_point(CoreStat::Focus).expect("points available");
    }
    let result =
        apply_level_progression(&mut player, &config, Some(&objects)).expect("allocation check");
    report(&config, &player, "spending every point on Focus", result.levels_gained);
}

fn report(config: &LevelingConfig, player: &Player, label: &str, levels_gained: u32) {
    let status =
        mental_status_for_level(config, player.stats.level).expect("level is in range");
    println!(
        "After {label}: level {} ({}), +{levels_gained} this turn, {} exp banked, {} points unspent",
        player.stats.level, status.display, player.stats.experience,
        player.stats.unspent_stat_points
    );
}
