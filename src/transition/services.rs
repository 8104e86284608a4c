//! Collaborators that carry out a scene change, and their in-world defaults.
use bevy::{
    log::{info, warn},
    prelude::*,
};

use crate::actor::components::ActorRegistry;

use super::components::{SceneRequest, DEFAULT_SPAWN_POINT};

/// Seconds spent fading out, and again fading back in.
pub const DEFAULT_FADE_SECS: f32 = 0.4;
/// Scene active at startup.
pub const INITIAL_SCENE: &str = "env1";

/// Fades the screen, switches scenes at full black, then fades back.
pub trait FadeTransition: Send + Sync {
    fn fade_and_load(&mut self, commands: &mut Commands, scene: &str, spawn_point: &str);
}

/// Keeps state that must survive a scene change.
pub trait GameStateStore: Send + Sync {
    fn persist_actor_state(&mut self, commands: &mut Commands);

    fn set_target_spawn_point(&mut self, commands: &mut Commands, spawn_point: &str);
}

/// Makes a scene the active one.
pub trait SceneLoader: Send + Sync {
    fn load_scene(&mut self, commands: &mut Commands, scene: &str);
}

/// Resource holding the scene-change collaborators.
#[derive(Resource)]
pub struct SceneServices {
    pub fader: Option<Box<dyn FadeTransition>>,
    pub game_state: Box<dyn GameStateStore>,
    pub loader: Box<dyn SceneLoader>,
}

impl SceneServices {
    pub fn new(
        fader: Option<Box<dyn FadeTransition>>,
        game_state: Box<dyn GameStateStore>,
        loader: Box<dyn SceneLoader>,
    ) -> Self {
        Self {
            fader,
            game_state,
            loader,
        }
    }

    /// Hands the request to the fader, or loads directly when there is none.
    pub fn request(&mut self, commands: &mut Commands, request: &SceneRequest) {
        if let Some(fader) = self.fader.as_mut() {
            info!(
                target: "transition",
                "Fading to {} at spawn point {}",
                request.scene,
                request.spawn_point
            );
            fader.fade_and_load(commands, &request.scene, &request.spawn_point);
            return;
        }

        warn!(
            target: "transition",
            "No fade transition available; loading {} directly",
            request.scene
        );
        self.load_directly(commands, request);
    }

    /// Persists the actor, records the spawn point, then loads the scene.
    pub fn load_directly(&mut self, commands: &mut Commands, request: &SceneRequest) {
        self.game_state.persist_actor_state(commands);
        self.game_state
            .set_target_spawn_point(commands, &request.spawn_point);
        self.loader.load_scene(commands, &request.scene);
    }
}

impl Default for SceneServices {
    fn default() -> Self {
        Self::new(
            Some(Box::new(OverlayFader)),
            Box::new(WorldGameState),
            Box::new(ActiveSceneLoader),
        )
    }
}

/// The scene currently shown; `generation` bumps on every load.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ActiveScene {
    pub name: String,
    pub spawn_point: String,
    pub generation: u32,
}

impl Default for ActiveScene {
    fn default() -> Self {
        Self {
            name: INITIAL_SCENE.to_string(),
            spawn_point: DEFAULT_SPAWN_POINT.to_string(),
            generation: 0,
        }
    }
}

impl ActiveScene {
    pub fn activate(&mut self, scene: impl Into<String>, spawn_point: impl Into<String>) {
        self.name = scene.into();
        self.spawn_point = spawn_point.into();
        self.generation = self.generation.wrapping_add(1);
    }
}

/// State carried across scene changes.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameState {
    pub actor_snapshot: Option<Vec3>,
    pub target_spawn_point: Option<String>,
}

#[derive(Debug, Clone)]
enum FadePhase {
    Clear,
    Out { request: SceneRequest, elapsed: f32 },
    In { elapsed: f32 },
}

/// Progress of the screen fade around a scene change.
#[derive(Resource, Debug, Clone)]
pub struct SceneFade {
    phase: FadePhase,
    duration: f32,
}

impl Default for SceneFade {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_SECS)
    }
}

impl SceneFade {
    pub fn new(duration: f32) -> Self {
        Self {
            phase: FadePhase::Clear,
            duration: duration.max(f32::EPSILON),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, FadePhase::Clear)
    }

    /// Starts fading out; refused while a fade is already running.
    pub fn begin(&mut self, request: SceneRequest) -> bool {
        if self.is_active() {
            return false;
        }
        self.phase = FadePhase::Out {
            request,
            elapsed: 0.0,
        };
        true
    }

    /// Advances the fade; yields the pending request once, at full black.
    pub fn advance(&mut self, dt: f32) -> Option<SceneRequest> {
        match &mut self.phase {
            FadePhase::Clear => None,
            FadePhase::Out { request, elapsed } => {
                *elapsed += dt;
                if *elapsed < self.duration {
                    return None;
                }
                let request = request.clone();
                self.phase = FadePhase::In { elapsed: 0.0 };
                Some(request)
            }
            FadePhase::In { elapsed } => {
                *elapsed += dt;
                if *elapsed >= self.duration {
                    self.phase = FadePhase::Clear;
                }
                None
            }
        }
    }

    /// Overlay opacity in `0..=1`.
    pub fn alpha(&self) -> f32 {
        match &self.phase {
            FadePhase::Clear => 0.0,
            FadePhase::Out { elapsed, .. } => (elapsed / self.duration).clamp(0.0, 1.0),
            FadePhase::In { elapsed } => 1.0 - (elapsed / self.duration).clamp(0.0, 1.0),
        }
    }
}

/// Default fader: drives [`SceneFade`] and its overlay.
#[derive(Debug, Default)]
pub struct OverlayFader;

impl FadeTransition for OverlayFader {
    fn fade_and_load(&mut self, commands: &mut Commands, scene: &str, spawn_point: &str) {
        let request = SceneRequest {
            scene: scene.to_string(),
            spawn_point: spawn_point.to_string(),
        };
        commands.queue(move |world: &mut World| {
            let Some(mut fade) = world.get_resource_mut::<SceneFade>() else {
                warn!(target: "transition", "SceneFade missing; dropping request for {}", request.scene);
                return;
            };
            if !fade.begin(request) {
                warn!(target: "transition", "Fade already running; request ignored");
            }
        });
    }
}

/// Default store backed by the [`GameState`] resource.
#[derive(Debug, Default)]
pub struct WorldGameState;

impl GameStateStore for WorldGameState {
    fn persist_actor_state(&mut self, commands: &mut Commands) {
        commands.queue(|world: &mut World| {
            let position = world
                .get_resource::<ActorRegistry>()
                .and_then(ActorRegistry::entity)
                .and_then(|entity| world.get::<Transform>(entity))
                .map(|transform| transform.translation);
            if let Some(mut state) = world.get_resource_mut::<GameState>() {
                state.actor_snapshot = position;
            }
        });
    }

    fn set_target_spawn_point(&mut self, commands: &mut Commands, spawn_point: &str) {
        let spawn_point = spawn_point.to_string();
        commands.queue(move |world: &mut World| {
            if let Some(mut state) = world.get_resource_mut::<GameState>() {
                state.target_spawn_point = Some(spawn_point);
            }
        });
    }
}

/// Default loader: switches [`ActiveScene`], consuming the recorded spawn point.
#[derive(Debug, Default)]
pub struct ActiveSceneLoader;

impl SceneLoader for ActiveSceneLoader {
    fn load_scene(&mut self, commands: &mut Commands, scene: &str) {
        let scene = scene.to_string();
        commands.queue(move |world: &mut World| {
            let spawn_point = world
                .get_resource_mut::<GameState>()
                .and_then(|mut state| state.target_spawn_point.take())
                .unwrap_or_else(|| DEFAULT_SPAWN_POINT.to_string());
            match world.get_resource_mut::<ActiveScene>() {
                Some(mut active) => {
                    info!(target: "transition", "Loading scene {} at {}", scene, spawn_point);
                    active.activate(scene, spawn_point);
                }
                None => warn!(target: "transition", "ActiveScene missing; cannot load {}", scene),
            }
        });
    }
}
