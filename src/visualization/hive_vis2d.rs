use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::color::{Alpha, Srgba};
use bevy::log::LogPlugin;
use bevy::window::PrimaryWindow;
use tracing::{debug, info};

use crate::simulation::scenario::Scenario;
use crate::simulation::position::{PositionStore, PositionWatcher};
use crate::simulation::registry::{HighlightFilter, LayoutRegistry, NodeKind};
use crate::simulation::states::{NVec2, Viewport};

/// Node circle tied to one registry entry and its store slot
#[derive(Component)]
struct NodeSprite {
    index: usize,
    watcher: PositionWatcher,
    base: Color,
}

#[derive(Component)]
struct CompanionSprite(pub usize);

/// Node currently held by the mouse and where on it it was grabbed
#[derive(Resource, Default)]
struct DragGrab {
    node: Option<String>,
    offset: Vec2,
}

/// Current category (keys 1-4) and focused companion interest (click a
/// companion). Resolution order lives in `HighlightFilter`
#[derive(Resource, Default)]
struct Highlight(HighlightFilter);

const COMPANION_RADIUS: f32 = 8.0;
const COMPANION_PICK_RADIUS: f64 = 16.0;
const DIMMED_ALPHA: f32 = 0.3;
const DASH: f32 = 4.0;
const GAP: f32 = 4.0;

pub fn run_2d(scenario: Scenario) {
    info!(
        nodes = scenario.registry.len(),
        companions = scenario.companions.len(),
        "starting 2D viewer"
    );

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::srgb(0.98, 0.976, 0.965)))
        .init_resource::<Highlight>()
        .init_resource::<DragGrab>()
        // tracing is already set up by main
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "The Hive Mind".into(),
                resolution: (1280.0, 800.0).into(),
                ..default()
            }),
            ..default()
        }).disable::<LogPlugin>())
        .add_systems(Startup, setup_layout_system)
        .add_systems(Update, (
            drag_system,
            physics_step_system,
            sync_node_transforms_system,
            sync_companions_system,
            draw_connections_system,
            highlight_keys_system,
            apply_highlight_system,
        ).chain())
        .run();
}

fn window_viewport(window: &Window) -> Viewport {
    Viewport::new(window.width() as f64, window.height() as f64)
}

/// Layout pixels (origin top-left, y down) -> world (origin centre, y up)
fn to_world(p: NVec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (p.x - viewport.width / 2.0) as f32,
        (viewport.height / 2.0 - p.y) as f32,
    )
}

fn node_color(hex: &str) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or(Color::WHITE)
}

fn setup_layout_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    for (i, node) in scenario.registry.nodes().iter().enumerate() {
        let Some(watcher) = scenario.store.subscribe(&node.id) else {
            continue;
        };
        let base = node_color(&node.color);
        let radius = scenario.registry.display_radius(&node.id) as f32;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius))),
                material: materials.add(ColorMaterial::from(base)),
                transform: Transform::from_xyz(0.0, 0.0, 1.0 + i as f32 * 0.01),
                ..Default::default()
            },
            NodeSprite { index: i, watcher, base },
        ));
    }

    for i in 0..scenario.companions.len() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(COMPANION_RADIUS))),
                material: materials.add(ColorMaterial::from(Color::srgb(0.11, 0.1, 0.09))),
                transform: Transform::from_xyz(0.0, 0.0, 5.0),
                ..Default::default()
            },
            CompanionSprite(i),
        ));
    }
}

/// Topmost node whose disc contains `cursor`, nearest centre on overlap
fn hit_test(registry: &LayoutRegistry, store: &PositionStore, cursor: NVec2) -> Option<String> {
    registry
        .nodes()
        .iter()
        .filter_map(|n| {
            let d = (store.get_by_id(&n.id)? - cursor).norm();
            (d <= registry.display_radius(&n.id)).then_some((d, &n.id))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id.clone())
}

/// Index of the companion drawn closest to `cursor` within `radius`
fn companion_hit(positions: &[Option<NVec2>], cursor: NVec2, radius: f64) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let d = ((*p)? - cursor).norm();
            (d <= radius).then_some((d, i))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, i)| i)
}

/// Select `value`, or clear the selection if it is already selected
fn toggle<T: PartialEq>(current: Option<T>, value: T) -> Option<T> {
    if current.as_ref() == Some(&value) {
        None
    } else {
        Some(value)
    }
}

fn drag_system(time: Res<Time>, buttons: Res<ButtonInput<MouseButton>>, windows: Query<&Window, With<PrimaryWindow>>, mut scenario: ResMut<Scenario>, mut grab: ResMut<DragGrab>, mut highlight: ResMut<Highlight>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    // Window cursor coordinates already use the layout's pixel space
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(c) = cursor {
            let at = NVec2::new(c.x as f64, c.y as f64);

            // Companions sit on top of the nodes, so they get the click first
            let positions = scenario.companion_positions(time.elapsed_seconds_f64());
            if let Some(i) = companion_hit(&positions, at, COMPANION_PICK_RADIUS) {
                let interest = scenario.companions[i].interest;
                highlight.0.interest = toggle(highlight.0.interest, interest);
                debug!(companion = %scenario.companions[i].id, filter = ?highlight.0, "highlight changed");
                return;
            }
        }
    }

    let Scenario { registry, engine, store, .. } = &mut *scenario;

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(c) = cursor {
            let at = NVec2::new(c.x as f64, c.y as f64);
            if let Some(id) = hit_test(registry, store, at) {
                if engine.on_drag_start(&id) {
                    let held = store.get_by_id(&id).unwrap_or(at);
                    grab.offset = c - Vec2::new(held.x as f32, held.y as f32);
                    grab.node = Some(id);
                }
            }
        }
    }

    let Some(id) = grab.node.clone() else {
        return;
    };

    if buttons.pressed(MouseButton::Left) {
        if let Some(c) = cursor {
            let p = c - grab.offset;
            engine.drag_to(store, NVec2::new(p.x as f64, p.y as f64));
        }
    }

    if buttons.just_released(MouseButton::Left) {
        engine.on_drag_end(&id, store);
        grab.node = None;
    }
}

fn physics_step_system(time: Res<Time>, windows: Query<&Window, With<PrimaryWindow>>, mut scenario: ResMut<Scenario>) {
    let viewport = windows.get_single().ok().map(window_viewport);
    scenario.tick(time.delta_seconds_f64() * 1000.0, viewport);
}

fn sync_node_transforms_system(scenario: Res<Scenario>, windows: Query<&Window, With<PrimaryWindow>>, mut query: Query<(&mut NodeSprite, &mut Transform)>) {
    let viewport = windows
        .get_single()
        .map(window_viewport)
        .unwrap_or(scenario.engine.parameters.fallback_viewport);

    for (mut sprite, mut transform) in &mut query {
        if let Some(p) = sprite.watcher.poll(&scenario.store) {
            let w = to_world(p, viewport);
            transform.translation.x = w.x;
            transform.translation.y = w.y;
        }
    }
}

fn sync_companions_system(time: Res<Time>, scenario: Res<Scenario>, windows: Query<&Window, With<PrimaryWindow>>, mut query: Query<(&CompanionSprite, &mut Transform)>) {
    let viewport = windows
        .get_single()
        .map(window_viewport)
        .unwrap_or(scenario.engine.parameters.fallback_viewport);
    let positions = scenario.companion_positions(time.elapsed_seconds_f64());

    for (CompanionSprite(i), mut transform) in &mut query {
        // Missing endpoint: leave it where it was this frame
        if let Some(p) = positions.get(*i).copied().flatten() {
            let w = to_world(p, viewport);
            transform.translation.x = w.x;
            transform.translation.y = w.y;
        }
    }
}

/// Split a->b into dash segments of `dash` length separated by `gap`
fn dash_segments(a: Vec2, b: Vec2, dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let len = a.distance(b);
    if len <= f32::EPSILON || dash <= 0.0 {
        return Vec::new();
    }
    let dir = (b - a) / len;
    let mut out = Vec::new();
    let mut s = 0.0;
    while s < len {
        let e = (s + dash).min(len);
        out.push((a + dir * s, a + dir * e));
        s = e + gap.max(0.0);
    }
    out
}

fn draw_connections_system(mut gizmos: Gizmos, scenario: Res<Scenario>, windows: Query<&Window, With<PrimaryWindow>>) {
    let viewport = windows
        .get_single()
        .map(window_viewport)
        .unwrap_or(scenario.engine.parameters.fallback_viewport);
    let Some(core) = scenario.store.get_by_id(scenario.registry.core_id()) else {
        return;
    };
    let from = to_world(core, viewport);
    let color = Color::srgba(0.47, 0.44, 0.42, 0.3);

    for node in scenario.registry.satellites() {
        if let Some(p) = scenario.store.get_by_id(&node.id) {
            for (s, e) in dash_segments(from, to_world(p, viewport), DASH, GAP) {
                gizmos.line_2d(s, e, color);
            }
        }
    }
}

fn highlight_keys_system(keys: Res<ButtonInput<KeyCode>>, mut highlight: ResMut<Highlight>) {
    const CATEGORY_KEYS: [KeyCode; 4] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];

    if keys.just_pressed(KeyCode::Digit0) {
        highlight.0 = HighlightFilter::all();
        return;
    }
    if keys.just_pressed(KeyCode::Escape) {
        highlight.0.interest = None;
    }
    for (key, kind) in CATEGORY_KEYS.into_iter().zip(NodeKind::ALL) {
        if keys.just_pressed(key) {
            highlight.0.category = toggle(highlight.0.category, kind);
            debug!(filter = ?highlight.0, "highlight changed");
        }
    }
}

fn apply_highlight_system(highlight: Res<Highlight>, scenario: Res<Scenario>, query: Query<(&NodeSprite, &Handle<ColorMaterial>)>, mut materials: ResMut<Assets<ColorMaterial>>) {
    if !highlight.is_changed() {
        return;
    }
    let lit = scenario.registry.highlighted(highlight.0);

    for (sprite, handle) in &query {
        let id = scenario.registry.nodes()[sprite.index].id.as_str();
        let alpha = if lit.contains(&id) { 1.0 } else { DIMMED_ALPHA };
        if let Some(material) = materials.get_mut(handle) {
            material.color = sprite.base.with_alpha(alpha);
        }
    }
}
