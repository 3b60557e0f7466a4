use crate::geom::Vec2;
use emberfall_lib::rules::WeatherKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct ParticleConfig {
    /// Hard cap on concurrently alive ambient particles.
    pub max_alive: usize,
    /// New spawns allowed per time slice, regardless of frame rate.
    pub spawns_per_slice: u32,
    pub slice_secs: f32,
    /// Half extents of the emission area.
    pub area: Vec2,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            max_alive: 96,
            spawns_per_slice: 6,
            slice_secs: 0.25,
            area: Vec2::new(960.0, 540.0),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub age: f32,
    pub lifetime: f32,
}

/// Weather-driven ambient particle pool. Emission is rate limited per time
/// slice and hard capped; requests beyond either bound are dropped, never
/// queued.
pub struct AmbientParticles {
    config: ParticleConfig,
    mode: WeatherKind,
    alive: Vec<Particle>,
    slice_clock: f32,
    spawned_this_slice: u32,
    rng: StdRng,
}

impl AmbientParticles {
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: ParticleConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ParticleConfig, rng: StdRng) -> Self {
        Self {
            config,
            mode: WeatherKind::Clear,
            alive: Vec::new(),
            slice_clock: 0.0,
            spawned_this_slice: 0,
            rng,
        }
    }

    /// Switches the emission mode. Already-alive particles decay naturally
    /// rather than vanishing on the frame the weather turns.
    pub fn set_mode(&mut self, mode: WeatherKind) {
        self.mode = mode;
    }

    pub fn mode(&self) -> WeatherKind {
        self.mode
    }

    pub fn advance(&mut self, dt: f32) {
        for particle in &mut self.alive {
            particle.age += dt;
            particle.position = particle.position + particle.velocity * dt;
        }
        self.alive.retain(|p| p.age < p.lifetime);

        self.slice_clock += dt;
        while self.slice_clock >= self.config.slice_secs {
            self.slice_clock -= self.config.slice_secs;
            self.spawned_this_slice = 0;
        }

        if self.mode == WeatherKind::Clear {
            return;
        }
        while self.spawned_this_slice < self.config.spawns_per_slice {
            if self.alive.len() >= self.config.max_alive {
                break;
            }
            let particle = self.spawn();
            self.alive.push(particle);
            self.spawned_this_slice += 1;
        }
    }

    fn spawn(&mut self) -> Particle {
        let area = self.config.area;
        let x = self.rng.gen_range(-area.x..area.x);
        let y = self.rng.gen_range(-area.y..area.y);
        let drift = self.rng.gen_range(0.8..1.2);
        let velocity = match self.mode {
            WeatherKind::Frost => Vec2::new(-12.0, 20.0),
            WeatherKind::Fog => Vec2::new(28.0, 0.0),
            WeatherKind::Downpour => Vec2::new(-30.0, 340.0),
            WeatherKind::Clear => Vec2::ZERO,
        } * drift;
        Particle {
            position: Vec2::new(x, y),
            velocity,
            age: 0.0,
            lifetime: self.rng.gen_range(2.0..5.0),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.alive
    }

    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }
}
