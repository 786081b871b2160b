//! Collection / reset cycle
//!
//! The controller owns the spawn set, the current potion batch and the
//! [`SessionState`] flags. Emptying the batch arms nothing by itself; the
//! player must then touch the reset floor, which relocates them to a
//! different spawn and lays the original potions out again. The
//! `reset_armed` flag makes that relocation one-shot per cycle, so a
//! sustained overlap with the reset floor cannot teleport twice.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Collectible, Player, SessionEvent, SessionPhase, SessionState, SpawnPoint};
use crate::error::ConfigError;

/// Result of touching the reset floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResetOutcome {
    /// Potions remain, or this cycle already relocated
    Ignored,
    /// Every spawn is where the player already stands; nothing happens
    NoAlternateSpawn,
    /// Player moved to a new spawn and the potions were laid out again
    Relocated { to: SpawnPoint },
}

/// Owns all mutable session state
#[derive(Debug, Clone)]
pub struct SessionController {
    spawn_points: Vec<SpawnPoint>,
    /// Positions used for every (re)spawn of the potion batch
    layout: Vec<Vec2>,
    collectibles: Vec<Collectible>,
    state: SessionState,
    player: Player,
    rng: Pcg32,
    next_id: u32,
    events: Vec<SessionEvent>,
}

impl SessionController {
    /// Store the spawn set and place the player on `initial_spawn_index`.
    ///
    /// The potion batch starts empty; call [`Self::spawn_collectibles`].
    pub fn initialize(
        spawn_points: Vec<SpawnPoint>,
        initial_spawn_index: usize,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if spawn_points.is_empty() {
            return Err(ConfigError::EmptySpawnSet);
        }
        let start = *spawn_points
            .get(initial_spawn_index)
            .ok_or(ConfigError::InvalidSpawnIndex {
                index: initial_spawn_index,
                len: spawn_points.len(),
            })?;

        log::debug!(
            "Session initialized with {} spawn points, starting at ({}, {})",
            spawn_points.len(),
            start.x,
            start.y
        );

        Ok(Self {
            spawn_points,
            layout: Vec::new(),
            collectibles: Vec::new(),
            state: SessionState::default(),
            player: Player::at(start.pos()),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            events: Vec::new(),
        })
    }

    /// Replace the potion batch with one active potion per position.
    ///
    /// The positions become the layout restored after every reset.
    pub fn spawn_collectibles(&mut self, positions: &[Vec2]) {
        self.layout = positions.to_vec();
        self.respawn_layout();
    }

    fn respawn_layout(&mut self) {
        self.collectibles.clear();
        for pos in self.layout.clone() {
            let id = self.next_entity_id();
            self.collectibles.push(Collectible { id, pos, active: true });
            self.events.push(SessionEvent::CollectibleSpawned { id, pos });
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Collect a potion. Returns false for unknown or already collected ids.
    pub fn on_collectible_touched(&mut self, id: u32) -> bool {
        let Some(collectible) = self
            .collectibles
            .iter_mut()
            .find(|c| c.id == id && c.active)
        else {
            return false;
        };
        collectible.active = false;

        let remaining = self.active_count();
        self.events
            .push(SessionEvent::CollectibleCollected { id, remaining });

        if remaining == 0 {
            self.state.all_collected = true;
            self.state.reset_armed = false;
            self.events.push(SessionEvent::AllCollected);
            log::info!("All potions collected! Find the reset floor to start over.");
        }
        true
    }

    /// Player is standing on the reset floor
    pub fn on_reset_trigger_touched(&mut self) -> ResetOutcome {
        if self.state.phase() != SessionPhase::AllCollected {
            return ResetOutcome::Ignored;
        }

        let target = choose_alternate_spawn(&self.spawn_points, self.player.pos, &mut self.rng);
        let Some(target) = target else {
            log::warn!(
                "Reset floor touched but no spawn differs from ({}, {}); staying put",
                self.player.pos.x,
                self.player.pos.y
            );
            self.events.push(SessionEvent::ResetSkipped);
            return ResetOutcome::NoAlternateSpawn;
        };

        self.state.reset_armed = true;

        let from = self.player.pos;
        self.player.place(target.pos());
        self.events.push(SessionEvent::PlayerRelocated {
            from,
            to: target.pos(),
        });

        self.state.all_collected = false;
        self.state.cycles += 1;
        self.respawn_layout();

        log::info!(
            "New cycle {} started at spawn ({}, {})",
            self.state.cycles,
            target.x,
            target.y
        );
        ResetOutcome::Relocated { to: target }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn spawn_points(&self) -> &[SpawnPoint] {
        &self.spawn_points
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn active_collectibles(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.iter().filter(|c| c.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_collectibles().count()
    }

    pub fn layout(&self) -> &[Vec2] {
        &self.layout
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Pick a spawn uniformly among those not at `current`.
///
/// Filter first, then draw one index; `None` when every spawn coincides
/// with the current position.
pub fn choose_alternate_spawn<R: Rng + ?Sized>(
    spawns: &[SpawnPoint],
    current: Vec2,
    rng: &mut R,
) -> Option<SpawnPoint> {
    let candidates: Vec<SpawnPoint> = spawns
        .iter()
        .filter(|s| !s.is_at(current))
        .copied()
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let index = rng.random_range(0..candidates.len());
    Some(candidates[index])
}
