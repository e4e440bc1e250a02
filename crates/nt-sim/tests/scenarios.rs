//! End-to-end gameplay scenarios driven through the simulation host.

use nt_abilities::{AbilityKind, AbilityState, NoEffect, PowerUp};
use nt_core::{EntityId, GameplayEventKind};
use nt_sim::{EffectTimerSystem, SimConfig, SimError, Simulation};
use proptest::prelude::*;

fn sim_with_hero() -> (Simulation, EntityId) {
    nt_sim::init_tracing();
    let mut sim = Simulation::with_default_systems(SimConfig::default());
    let hero = sim.spawn_character("Rook");
    (sim, hero)
}

fn health(sim: &Simulation, id: EntityId) -> f32 {
    sim.character(id).unwrap().attributes().health()
}

fn descriptions(sim: &Simulation, id: EntityId) -> String {
    sim.events()
        .events_for_entity(id)
        .iter()
        .map(|e| e.description.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn invincibility_blocks_damage_until_timer_fires() {
    let (mut sim, hero) = sim_with_hero();

    assert!(sim.apply_power_up(hero, PowerUp::AegisCharm).unwrap());
    assert_eq!(sim.apply_damage(hero, 50.0).unwrap(), 0.0);
    assert_eq!(health(&sim, hero), 100.0);

    // Default duration is 10 s at 60 steps per second
    sim.run(590).unwrap();
    assert!(sim.character(hero).unwrap().is_invincible());
    sim.run(20).unwrap();
    let character = sim.character(hero).unwrap();
    assert!(!character.is_invincible());
    assert_eq!(character.power_up(), PowerUp::Small);

    assert_eq!(sim.apply_damage(hero, 50.0).unwrap(), 50.0);
    assert_eq!(health(&sim, hero), 50.0);

    let timers = sim.get_system::<EffectTimerSystem>().unwrap();
    assert_eq!(timers.dispatched(), 1);

    insta::assert_snapshot!(descriptions(&sim, hero), @r"
    became invincible
    Aegis Charm activated
    power-up applied: aegis charm
    invincibility blocked 50.0 damage
    vulnerable again
    Aegis Charm ended
    health 100.0 -> 50.0 (-50.0)
    ");
}

#[test]
fn growth_buff_raises_and_restores_max_health() {
    let (mut sim, hero) = sim_with_hero();

    sim.apply_power_up(hero, PowerUp::VigorSeed).unwrap();
    let character = sim.character(hero).unwrap();
    assert_eq!(character.attributes().max_health(), 150.0);
    assert_eq!(character.attributes().health(), 150.0);
    assert_eq!(character.state().scale(), [1.5, 1.5, 1.5]);

    assert!(sim.deactivate_ability(hero, AbilityKind::VigorSeed).unwrap());
    let character = sim.character(hero).unwrap();
    assert_eq!(character.attributes().max_health(), 100.0);
    assert_eq!(character.state().scale(), [1.0, 1.0, 1.0]);
}

#[test]
fn replacing_damage_buff_restores_original_damage() {
    let (mut sim, hero) = sim_with_hero();
    let damage = |sim: &Simulation| sim.character(hero).unwrap().attributes().damage();

    sim.apply_power_up(hero, PowerUp::InfernoShard).unwrap();
    assert_eq!(damage(&sim), 20.0);
    sim.apply_power_up(hero, PowerUp::AegisCharm).unwrap();
    assert_eq!(damage(&sim), 10.0);
    sim.apply_power_up(hero, PowerUp::InfernoShard).unwrap();
    assert_eq!(damage(&sim), 20.0);
    assert!(!sim.character(hero).unwrap().is_invincible());
}

#[test]
fn collection_bonus_once_per_level() {
    let (mut sim, hero) = sim_with_hero();

    let grants: Vec<bool> = (0..4)
        .map(|_| sim.add_collection(hero, 1).unwrap())
        .collect();
    assert_eq!(grants, [false, false, true, false]);
    assert_eq!(sim.character(hero).unwrap().lives(), 4);

    sim.reset_collections(hero).unwrap();
    let grants: Vec<bool> = (0..3)
        .map(|_| sim.add_collection(hero, 1).unwrap())
        .collect();
    assert_eq!(grants, [false, false, true]);
    assert_eq!(sim.character(hero).unwrap().lives(), 5);
}

#[test]
fn hard_landing_deals_fall_damage() {
    let (mut sim, hero) = sim_with_hero();

    sim.set_vertical_velocity(hero, -1200.0).unwrap();
    sim.run(60).unwrap();
    assert_eq!(health(&sim, hero), 100.0);

    sim.set_vertical_velocity(hero, 0.0).unwrap();
    sim.step().unwrap();
    assert!((health(&sim, hero) - 80.0).abs() < 1e-2);
    assert_eq!(sim.character(hero).unwrap().fall_accumulator(), 0.0);
}

#[test]
fn soft_landing_is_harmless() {
    let (mut sim, hero) = sim_with_hero();

    sim.set_vertical_velocity(hero, -500.0).unwrap();
    sim.run(60).unwrap();
    sim.set_vertical_velocity(hero, 0.0).unwrap();
    sim.step().unwrap();
    assert_eq!(health(&sim, hero), 100.0);
}

#[test]
fn invincibility_absorbs_fall_damage() {
    let (mut sim, hero) = sim_with_hero();
    sim.apply_power_up(hero, PowerUp::AegisCharm).unwrap();

    sim.set_vertical_velocity(hero, -3000.0).unwrap();
    sim.run(60).unwrap();
    sim.set_vertical_velocity(hero, 0.0).unwrap();
    sim.step().unwrap();

    assert_eq!(health(&sim, hero), 100.0);
    assert!(
        sim.events()
            .events_for_entity(hero)
            .iter()
            .any(|e| matches!(e.kind, GameplayEventKind::DamageBlocked { .. }))
    );
}

#[test]
fn add_ability_is_idempotent() {
    let (mut sim, hero) = sim_with_hero();
    let abilities = sim.character_mut(hero).unwrap().abilities_mut();

    assert!(abilities.add_ability(AbilityKind::FireFlower).is_some());
    assert!(abilities.add_ability(AbilityKind::FireFlower).is_none());
    assert_eq!(abilities.ability_count(), 1);
}

#[test]
fn ability_cooldown_round_trip() {
    let (mut sim, hero) = sim_with_hero();
    let abilities = sim.character_mut(hero).unwrap().abilities_mut();
    let dash = abilities.tuning().custom("dash", NoEffect);
    abilities.insert_ability(dash);
    let dash = AbilityKind::Custom("dash");

    assert!(sim.activate_ability(hero, dash, None).unwrap());
    assert!(!sim.activate_ability(hero, dash, None).unwrap());

    sim.run(10).unwrap();
    assert!(!sim.activate_ability_by_index(hero, 0, None).unwrap());

    // 0.5 s cooldown at 60 steps per second
    sim.run(21).unwrap();
    let ability = sim
        .character(hero)
        .unwrap()
        .abilities()
        .get_ability(dash)
        .unwrap();
    assert_eq!(ability.state(), AbilityState::Idle);
    assert!(sim.activate_ability_by_index(hero, 0, None).unwrap());
}

#[test]
fn death_disables_abilities_until_revived() {
    let (mut sim, hero) = sim_with_hero();

    assert_eq!(sim.apply_damage(hero, 120.0).unwrap(), 100.0);
    assert!(!sim.character(hero).unwrap().is_alive());
    assert_eq!(sim.apply_damage(hero, 10.0).unwrap(), 0.0);
    assert_eq!(sim.heal(hero, 10.0).unwrap(), 0.0);

    assert!(!sim.apply_power_up(hero, PowerUp::InfernoShard).unwrap());
    assert_eq!(sim.character(hero).unwrap().attributes().damage(), 10.0);

    let died = sim
        .events()
        .events_for_entity(hero)
        .iter()
        .filter(|e| e.kind == GameplayEventKind::Died)
        .count();
    assert_eq!(died, 1);

    sim.revive(hero).unwrap();
    assert_eq!(health(&sim, hero), 100.0);
    assert!(sim.apply_power_up(hero, PowerUp::InfernoShard).unwrap());
}

#[test]
fn revive_clears_live_buffs() {
    let (mut sim, hero) = sim_with_hero();
    sim.apply_power_up(hero, PowerUp::InfernoShard).unwrap();
    sim.apply_damage(hero, 500.0).unwrap();
    sim.revive(hero).unwrap();

    let character = sim.character(hero).unwrap();
    assert_eq!(character.power_up(), PowerUp::Small);
    assert_eq!(character.attributes().damage(), 10.0);
    let shard = character
        .abilities()
        .get_ability(AbilityKind::InfernoShard)
        .unwrap();
    assert!(!shard.is_effect_active());

    sim.apply_power_up(hero, PowerUp::VigorSeed).unwrap();
    sim.apply_damage(hero, 500.0).unwrap();
    sim.revive(hero).unwrap();

    let character = sim.character(hero).unwrap();
    assert_eq!(character.power_up(), PowerUp::Small);
    assert_eq!(character.attributes().max_health(), 100.0);
    assert_eq!(character.attributes().health(), 100.0);
    assert_eq!(character.state().scale(), [1.0, 1.0, 1.0]);

    assert!(sim.apply_power_up(hero, PowerUp::VigorSeed).unwrap());
    assert_eq!(sim.character(hero).unwrap().attributes().max_health(), 150.0);
}

#[test]
fn manual_deactivation_returns_to_small() {
    for category in [PowerUp::VigorSeed, PowerUp::InfernoShard, PowerUp::AegisCharm] {
        let (mut sim, hero) = sim_with_hero();
        sim.apply_power_up(hero, category).unwrap();
        let kind = category.ability_kind().unwrap();

        assert!(sim.deactivate_ability(hero, kind).unwrap());
        let character = sim.character(hero).unwrap();
        assert_eq!(character.power_up(), PowerUp::Small, "{category}");
        let policy = character.power_up_policy();
        assert!(!policy.has_vigor_seed());
        assert!(!policy.has_inferno_shard());
        assert!(!policy.has_aegis_charm());
        assert!(!character.is_invincible());
        assert_eq!(character.attributes().damage(), 10.0);
        assert_eq!(character.attributes().max_health(), 100.0);
    }
}

#[test]
fn aegis_ended_by_hand_stays_vulnerable() {
    let (mut sim, hero) = sim_with_hero();
    sim.apply_power_up(hero, PowerUp::AegisCharm).unwrap();
    sim.deactivate_ability(hero, AbilityKind::AegisCharm).unwrap();

    sim.run(1200).unwrap();
    assert_eq!(sim.pending_timers(), 0);
    assert_eq!(sim.character(hero).unwrap().power_up(), PowerUp::Small);
    assert_eq!(sim.apply_damage(hero, 30.0).unwrap(), 30.0);
}

#[test]
fn refused_power_up_is_not_recorded() {
    let (mut sim, hero) = sim_with_hero();
    sim.set_abilities_enabled(hero, false).unwrap();
    assert!(!sim.apply_power_up(hero, PowerUp::AegisCharm).unwrap());

    sim.set_abilities_enabled(hero, true).unwrap();
    sim.run(1200).unwrap();
    let character = sim.character(hero).unwrap();
    assert_eq!(character.power_up(), PowerUp::Small);
    assert!(!character.power_up_policy().has_aegis_charm());
    assert_eq!(sim.apply_damage(hero, 30.0).unwrap(), 30.0);
}

#[test]
fn disabled_abilities_refuse_activation() {
    let (mut sim, hero) = sim_with_hero();
    sim.set_abilities_enabled(hero, false).unwrap();
    assert!(!sim.apply_power_up(hero, PowerUp::AegisCharm).unwrap());
    assert!(!sim.character(hero).unwrap().is_invincible());

    sim.set_abilities_enabled(hero, true).unwrap();
    assert!(sim.activate_ability(hero, AbilityKind::AegisCharm, None).unwrap());
    assert!(sim.character(hero).unwrap().is_invincible());
}

#[test]
fn despawned_character_commands_fail() {
    let (mut sim, hero) = sim_with_hero();
    sim.despawn(hero).unwrap();
    assert!(matches!(
        sim.heal(hero, 5.0),
        Err(SimError::EntityNotFound(_))
    ));
    assert!(sim.deactivate_ability(hero, AbilityKind::VigorSeed).is_err());
}

#[test]
fn characters_are_independent() {
    nt_sim::init_tracing();
    let mut sim = Simulation::with_default_systems(SimConfig::default().with_max_health(80.0));
    let a = sim.spawn_character("Rook");
    let b = sim.spawn_character("Wren");

    sim.apply_power_up(a, PowerUp::AegisCharm).unwrap();
    sim.apply_damage(a, 30.0).unwrap();
    sim.apply_damage(b, 30.0).unwrap();

    assert_eq!(health(&sim, a), 80.0);
    assert_eq!(health(&sim, b), 50.0);
    assert_eq!(sim.characters().count(), 2);
}

proptest! {
    #[test]
    fn health_stays_within_bounds(
        ops in prop::collection::vec((any::<bool>(), -50.0f32..200.0), 0..40)
    ) {
        let mut sim = Simulation::with_default_systems(SimConfig::default());
        let hero = sim.spawn_character("Rook");

        for (is_damage, amount) in ops {
            let before = health(&sim, hero);
            let applied = if is_damage {
                sim.apply_damage(hero, amount).unwrap()
            } else {
                sim.heal(hero, amount).unwrap()
            };
            let after = health(&sim, hero);

            prop_assert!(applied >= 0.0);
            prop_assert!((0.0..=100.0).contains(&after));
            if amount <= 0.0 {
                prop_assert_eq!(applied, 0.0);
                prop_assert_eq!(after, before);
            }
        }
    }
}
