use std::collections::HashMap;

use super::*;
use crate::{
    config::spec::ImageRef, foundation::error::ParallaxError,
    host::collaborators::ResolvedImage, render::schedule::RedrawQueue,
};

#[derive(Default)]
struct NamedResolver {
    sizes: HashMap<String, (u32, u32)>,
    calls: usize,
}

impl NamedResolver {
    fn with(entries: &[(&str, u32, u32)]) -> Self {
        Self {
            sizes: entries
                .iter()
                .map(|&(name, w, h)| (name.to_string(), (w, h)))
                .collect(),
            calls: 0,
        }
    }
}

impl ImageResolver for NamedResolver {
    type Texture = String;

    fn resolve(&mut self, reference: &ImageRef) -> ParallaxResult<ResolvedImage<String>> {
        self.calls += 1;
        let &(width, height) = self
            .sizes
            .get(reference.as_str())
            .ok_or_else(|| ParallaxError::image_not_found(reference.as_str()))?;
        Ok(ResolvedImage {
            texture: reference.as_str().to_string(),
            width,
            height,
        })
    }
}

fn viewport() -> Viewport {
    Viewport {
        width: 800,
        height: 600,
    }
}

fn stage(direction: Direction, layers: Vec<LayerSpec>) -> ParallaxStage<NamedResolver> {
    let resolver = NamedResolver::with(&[("far", 400, 600), ("near", 300, 200), ("flat", 0, 10)]);
    let options = StageOptions {
        direction,
        ..StageOptions::default()
    };
    ParallaxStage::new(viewport(), options, layers, resolver).unwrap()
}

#[test]
fn construction_requires_layers() {
    let err = ParallaxStage::new(
        viewport(),
        StageOptions::default(),
        Vec::new(),
        NamedResolver::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParallaxError::Configuration(_)));
}

#[test]
fn construction_names_offending_layer() {
    let layers = vec![
        LayerSpec::new("far", 0.1),
        LayerSpec::new("near", 0.2),
        LayerSpec::new("near", -1.0),
    ];
    let err = ParallaxStage::new(
        viewport(),
        StageOptions::default(),
        layers,
        NamedResolver::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParallaxError::Configuration(_)));
    assert!(err.to_string().contains("layer 3"), "{err}");
}

#[test]
fn construction_does_not_touch_resolver() {
    let s = stage(Direction::LeftToRight, vec![LayerSpec::new("far", 0.1)]);
    assert_eq!(s.resolver().calls, 0);
    assert_eq!(s.layers()[0].size(), None);
}

#[test]
fn update_scenario_and_redraw_request() {
    let mut s = stage(Direction::LeftToRight, vec![LayerSpec::new("far", 0.1)]);
    let mut q = RedrawQueue::new();

    let f0 = s.update(0.0, &mut q).unwrap();
    assert_eq!(f0.layer_positions(0), vec![0, 400]);
    assert_eq!(q.take(), Some(0.01));

    let f1 = s.update(1.0, &mut q).unwrap();
    assert_eq!(s.layers()[0].offset(), -40.0);
    assert_eq!(f1.layer_positions(0), vec![-40, 360, 760]);
    assert_eq!(f1.at, 1.0);
    assert_eq!(f1.viewport, viewport());
    for cmd in &f1.commands {
        assert_eq!(cmd.y, 0);
        assert_eq!((cmd.width, cmd.height), (400, 600));
        assert_eq!(cmd.texture, "far");
    }
    assert_eq!(f1.commands[0].origin(), Point::new(-40.0, 0.0));
    assert_eq!(q.requests(), 2);
}

#[test]
fn commands_follow_back_to_front_paint_order() {
    let mut s = stage(
        Direction::LeftToRight,
        vec![LayerSpec::new("far", 0.05), LayerSpec::new("near", 0.5)],
    );
    let mut q = RedrawQueue::new();
    let frame = s.update(0.4, &mut q).unwrap();

    let order: Vec<usize> = frame.commands.iter().map(|c| c.layer).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(order.first(), Some(&0));
    assert_eq!(order.last(), Some(&1));
    assert_eq!(frame.layer_commands(1).count(), frame.layer_positions(1).len());
}

#[test]
fn nearer_layers_move_faster() {
    let mut s = stage(
        Direction::LeftToRight,
        vec![LayerSpec::new("far", 0.05), LayerSpec::new("far", 0.2)],
    );
    let mut q = RedrawQueue::new();
    s.update(1.0, &mut q).unwrap();
    let far = s.layers()[0].offset();
    let near = s.layers()[1].offset();
    assert_eq!(far, -20.0);
    assert_eq!(near, -80.0);
}

#[test]
fn directions_produce_mirror_layouts() {
    let specs = vec![LayerSpec::new("far", 0.07), LayerSpec::new("near", 0.33)];
    let mut ltr = stage(Direction::LeftToRight, specs.clone());
    let mut rtl = stage(Direction::RightToLeft, specs);
    let mut q = RedrawQueue::new();

    for t in [0.0, 0.25, 1.1, 3.0, 7.77, 20.0] {
        let a = ltr.update(t, &mut q).unwrap();
        let b = rtl.update(t, &mut q).unwrap();
        assert_eq!(a.commands.len(), b.commands.len(), "t={t}");
        for (ca, cb) in a.commands.iter().zip(b.commands.iter()) {
            assert_eq!(ca.layer, cb.layer);
            assert_eq!(
                i64::from(viewport().width) - ca.x - i64::from(ca.width),
                cb.x,
                "t={t}"
            );
        }
    }
}

#[test]
fn resolution_happens_once_per_layer() {
    let mut s = stage(
        Direction::LeftToRight,
        vec![LayerSpec::new("far", 0.1), LayerSpec::new("near", 0.3)],
    );
    let mut q = RedrawQueue::new();
    for n in 0..10 {
        s.update(f64::from(n) * 0.1, &mut q).unwrap();
    }
    assert_eq!(s.resolver().calls, 2);
}

#[test]
fn degenerate_layer_fails_update_without_rescheduling() {
    let mut s = stage(
        Direction::LeftToRight,
        vec![LayerSpec::new("far", 0.1), LayerSpec::new("flat", 0.1)],
    );
    let mut q = RedrawQueue::new();
    let err = s.update(0.0, &mut q).unwrap_err();
    assert!(matches!(err, ParallaxError::DegenerateImage { .. }));
    assert_eq!(q.pending(), None);

    let err = s.update(0.1, &mut q).unwrap_err();
    assert!(matches!(err, ParallaxError::DegenerateImage { .. }));
}

#[test]
fn missing_image_surfaces_from_update() {
    let mut s = stage(Direction::LeftToRight, vec![LayerSpec::new("nowhere", 0.1)]);
    let mut q = RedrawQueue::new();
    assert!(matches!(
        s.update(0.0, &mut q),
        Err(ParallaxError::ImageNotFound(_))
    ));
}

#[test]
fn accessors_reflect_configuration() {
    let spec = StageSpec {
        viewport: viewport(),
        options: StageOptions {
            direction: Direction::RightToLeft,
            redraw_interval: 0.05,
            speed_policy: SpeedPolicy::BoundedUnitInterval,
        },
        layers: vec![LayerSpec::new("far", 0.5)],
    };
    let s = ParallaxStage::from_spec(spec, NamedResolver::default()).unwrap();
    assert_eq!(s.viewport(), viewport());
    assert_eq!(s.direction(), Direction::RightToLeft);
    assert_eq!(s.redraw_interval(), 0.05);
    assert_eq!(s.speed_policy(), SpeedPolicy::BoundedUnitInterval);
    assert_eq!(s.layers().len(), 1);
    assert_eq!(s.layers()[0].direction(), Direction::RightToLeft);
    assert_eq!(s.layers()[0].speed(), 0.5);
    assert_eq!(s.layers()[0].image().as_str(), "far");
    assert!(format!("{s:?}").contains("ParallaxStage"));
}
