//! Scripted stand-in for the browser game loop: a runner moving down a
//! three-lane track laid out from noise, reporting gameplay events.

use dash_core::constants::{DEFAULT_COLLISION_THRESHOLD, POINTS_PER_ACORN, POINTS_PER_METER};
use dash_core::{
    check_collision, lerp, noise, perlin_noise_default, AudioBackend, GameContext, GameEvent,
    KeyValueStore,
};
use glam::Vec3;

const LANE_WIDTH: f32 = 1.5;
const LOOKAHEAD_M: f32 = 30.0;
const BASE_SPEED: f32 = 8.0; // meters per second
const JUMP_INTERVAL_SEC: f32 = 1.2;
const COMBO_STEP: u32 = 5; // acorns in a row per combo level

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickupKind {
    Acorn,
    Branch,
}

#[derive(Clone, Copy, Debug)]
struct Pickup {
    position: Vec3,
    kind: PickupKind,
}

pub struct ScriptedRun {
    pub distance: f32,
    pub acorns: u64,
    pub collisions: u32,
    streak: u32,
    speed: f32,
    player_x: f32,
    jump_timer: f32,
    next_slot: u32,
    pickups: Vec<Pickup>,
}

impl Default for ScriptedRun {
    fn default() -> Self {
        Self {
            distance: 0.0,
            acorns: 0,
            collisions: 0,
            streak: 0,
            speed: BASE_SPEED,
            player_x: 0.0,
            jump_timer: JUMP_INTERVAL_SEC,
            next_slot: 1,
            pickups: Vec::new(),
        }
    }
}

impl ScriptedRun {
    pub fn score(&self) -> u64 {
        self.acorns * POINTS_PER_ACORN + (self.distance * POINTS_PER_METER as f32) as u64
    }

    fn lane_for(slot: u32) -> f32 {
        let n = noise(slot as f64, 1.0, 0.0) as f32;
        (n * 1.5).round().clamp(-1.0, 1.0) * LANE_WIDTH
    }

    fn lay_track(&mut self) {
        while (self.next_slot as f32) <= self.distance + LOOKAHEAD_M {
            let slot = self.next_slot;
            let n = perlin_noise_default(slot as f64 * 0.37, 0.0, 0.0);
            let kind = if n > 0.1 {
                Some(PickupKind::Acorn)
            } else if n < -0.2 {
                Some(PickupKind::Branch)
            } else {
                None
            };
            if let Some(kind) = kind {
                self.pickups.push(Pickup {
                    position: Vec3::new(Self::lane_for(slot), 0.0, slot as f32),
                    kind,
                });
            }
            self.next_slot += 1;
        }
    }

    /// Steer toward the nearest acorn ahead, away from the nearest branch.
    fn steer(&mut self, dt: f32) {
        let ahead = self
            .pickups
            .iter()
            .filter(|p| p.position.z > self.distance)
            .min_by(|a, b| a.position.z.total_cmp(&b.position.z));
        let target = match ahead {
            Some(p) if p.kind == PickupKind::Acorn => p.position.x,
            Some(p) if p.position.x.abs() < f32::EPSILON => LANE_WIDTH,
            _ => self.player_x,
        };
        self.player_x = lerp(self.player_x, target, (dt * 6.0).min(1.0));
    }

    pub fn step<A: AudioBackend, S: KeyValueStore>(
        &mut self,
        game: &mut GameContext<A, S>,
        dt: f32,
    ) {
        self.lay_track();
        self.steer(dt);
        self.distance += self.speed * dt;
        let player = Vec3::new(self.player_x, 0.0, self.distance);

        self.jump_timer -= dt;
        if self.jump_timer <= 0.0 {
            self.jump_timer = JUMP_INTERVAL_SEC;
            game.handle(GameEvent::Jump { position: player });
        }

        let mut events = Vec::new();
        self.pickups.retain(|p| {
            if !check_collision(&player, &p.position, DEFAULT_COLLISION_THRESHOLD) {
                // drop what the runner has passed
                return p.position.z > player.z - 2.0;
            }
            events.push(*p);
            false
        });
        for p in events {
            match p.kind {
                PickupKind::Acorn => {
                    self.acorns += 1;
                    self.streak += 1;
                    game.handle(GameEvent::Collect {
                        position: p.position,
                    });
                    if self.streak % COMBO_STEP == 0 {
                        game.handle(GameEvent::Combo {
                            level: self.streak / COMBO_STEP,
                            position: p.position,
                        });
                    }
                }
                PickupKind::Branch => {
                    self.collisions += 1;
                    self.streak = 0;
                    self.speed = (self.speed * 0.8).max(BASE_SPEED * 0.5);
                    game.handle(GameEvent::Collision {
                        position: p.position,
                    });
                }
            }
        }
        self.speed = lerp(self.speed, BASE_SPEED, (dt * 0.5).min(1.0));
    }
}
