use anyhow::Result;
use border_minerl_act::{
    ActionCodec, ActionCodecConfig, ActionGroup, ActionLayout, Button, CodecError, Control,
    MinerlAction, RawAction,
};
use std::{collections::HashSet, sync::Arc, thread};
use test_log::test;

const LAYOUTS: [ActionLayout; 3] = [
    ActionLayout::SingleHead,
    ActionLayout::SplitHead,
    ActionLayout::Flat,
];

/// 2 groups of size 2 and a 3x3 camera grid.
fn small_config(layout: ActionLayout) -> ActionCodecConfig {
    ActionCodecConfig::default()
        .groups(vec![
            vec![Button::Forward, Button::Back].into(),
            vec![Button::Left, Button::Right].into(),
        ])
        .hotbar_slots(0)
        .camera_bins(3)
        .camera_base(10.0)
        .layout(layout)
}

fn all_raw_actions(codec: &ActionCodec) -> Vec<RawAction> {
    let space = codec.action_space();
    (0..space.size())
        .map(|i| space.raw_from_index(i).unwrap())
        .collect()
}

fn inventory_selected(raw: &RawAction) -> bool {
    match *raw {
        RawAction::Flat(id) => id == 0,
        RawAction::SingleHead { main_head, .. } => main_head == 0,
        RawAction::SplitHead { inventory, .. } => inventory,
    }
}

fn assert_groups_exclusive(codec: &ActionCodec, act: &MinerlAction) {
    for group in codec.groups().groups() {
        let n_active = group.controls().iter().filter(|c| act.is_active(**c)).count();
        assert!(n_active <= 1, "{:?} violates {:?}", act, group);
    }
}

#[test]
fn test_small_space_sizes() -> Result<()> {
    let sizes: Vec<usize> = LAYOUTS
        .iter()
        .map(|l| ActionCodec::build(&small_config(*l)).map(|c| c.space_size()))
        .collect::<Result<_, _>>()?;
    // SingleHead: (1 + 2 * 9) * 9, SplitHead: 9 * 2 * 2 * 9, Flat: 1 + 9 * 9
    assert_eq!(sizes, vec![171, 324, 82]);
    Ok(())
}

#[test]
fn test_every_raw_action_decodes() -> Result<()> {
    for layout in LAYOUTS.iter() {
        let codec = ActionCodec::build(&small_config(*layout))?;
        let raws = all_raw_actions(&codec);
        assert_eq!(raws.len(), codec.space_size());

        let mut distinct = HashSet::new();
        for raw in raws.iter() {
            let act = codec.decode_action(raw)?;
            assert_groups_exclusive(&codec, &act);
            if inventory_selected(raw) {
                assert_eq!(act, codec.inventory_action());
            } else {
                assert!(!act.inventory);
            }
            distinct.insert(serde_yaml::to_string(&act)?);
        }

        // inventory + 9 group combinations x (camera off + 9 cells), where the
        // center cell and camera off coincide
        assert_eq!(distinct.len(), 1 + 9 * 9, "{:?}", layout);
    }
    Ok(())
}

#[test]
fn test_flat_layout_is_a_bijection() -> Result<()> {
    let codec = ActionCodec::build(&small_config(ActionLayout::Flat))?;
    let mut distinct = HashSet::new();
    for raw in all_raw_actions(&codec) {
        let act = codec.decode_action(&raw)?;
        assert_eq!(codec.encode_action(&act)?, raw);
        distinct.insert(serde_yaml::to_string(&act)?);
    }
    assert_eq!(distinct.len(), codec.space_size());
    Ok(())
}

#[test]
fn test_round_trip() -> Result<()> {
    for layout in LAYOUTS.iter() {
        let codec = ActionCodec::build(&small_config(*layout))?;
        for raw in all_raw_actions(&codec) {
            let act = codec.decode_action(&raw)?;
            let raw_ = codec.encode_action(&act)?;
            assert_eq!(codec.decode_action(&raw_)?, act);
        }
    }
    Ok(())
}

#[test]
fn test_out_of_range_is_rejected() -> Result<()> {
    for layout in LAYOUTS.iter() {
        let codec = ActionCodec::build(&small_config(*layout))?;
        let space = codec.action_space();
        for (i, head) in space.heads().iter().enumerate() {
            let mut values = vec![0i64; space.heads().len()];
            values[i] = head.n as i64;
            assert_eq!(
                codec.decode_slice(&values),
                Err(CodecError::OutOfRange {
                    field: head.name,
                    value: head.n as i64,
                    bound: head.n
                })
            );
        }
        assert!(space.raw_from_index(space.size()).is_err());
    }

    let codec = ActionCodec::build(&small_config(ActionLayout::SplitHead))?;
    assert!(codec
        .decode_action(&RawAction::SplitHead {
            main_head: 9,
            inventory: false,
            camera_enabled: false,
            camera_head: 0
        })
        .is_err());
    Ok(())
}

#[test]
fn test_inventory_priority() -> Result<()> {
    let codec = ActionCodec::build(&small_config(ActionLayout::SplitHead))?;
    for main_head in 0..9 {
        for camera_head in 0..9 {
            for camera_enabled in [false, true].iter() {
                let act = codec.decode_action(&RawAction::SplitHead {
                    main_head,
                    inventory: true,
                    camera_enabled: *camera_enabled,
                    camera_head,
                })?;
                assert_eq!(act, MinerlAction::inventory_only());
            }
        }
    }

    let codec = ActionCodec::build(&small_config(ActionLayout::SingleHead))?;
    for camera_head in 0..9 {
        let act = codec.decode_action(&RawAction::SingleHead {
            main_head: 0,
            camera_head,
        })?;
        assert_eq!(act, MinerlAction::inventory_only());
    }
    Ok(())
}

#[test]
fn test_single_group_scenario() -> Result<()> {
    let config = ActionCodecConfig::default()
        .groups(vec![vec![Button::Forward, Button::Back].into()])
        .camera_bins(3)
        .layout(ActionLayout::SingleHead);
    let codec = ActionCodec::build(&config)?;
    assert_eq!(codec.action_space().nvec(), vec![7, 9]);

    let decode = |main_head| {
        codec.decode_action(&RawAction::SingleHead {
            main_head,
            camera_head: 0,
        })
    };

    assert_eq!(decode(0)?, MinerlAction::inventory_only());
    assert_eq!(decode(1)?, MinerlAction::noop());
    let act = decode(2)?;
    assert!(act.forward && !act.back);
    assert!(!act.camera_moves());
    let act = decode(3)?;
    assert!(act.back && !act.forward);

    // camera-enabled digit set, camera head 0 is the bottom-left cell
    let act = decode(4)?;
    assert!(act.active_controls().is_empty());
    assert_eq!(act.camera, [-10.0, -10.0]);
    assert!(decode(7).is_err());
    Ok(())
}

#[test]
fn test_camera_scenario() -> Result<()> {
    let codec = ActionCodec::build(&ActionCodecConfig::default())?;
    let camera = codec.camera();
    assert_eq!(camera.decode(5, 5)?, (0.0, 0.0));

    let (dx, _) = camera.decode(10, 5)?;
    assert!(dx > 0.0);
    assert_eq!(camera.decode(0, 5)?.0, -dx);

    for k in 1..=5 {
        assert_eq!(camera.decode(5 + k, 5)?.0, -camera.decode(5 - k, 5)?.0);
    }
    Ok(())
}

#[test]
fn test_default_space_sampled() -> Result<()> {
    let rng = fastrand::Rng::with_seed(42);
    for layout in LAYOUTS.iter() {
        let codec = ActionCodec::build(&ActionCodecConfig::default().layout(*layout))?;
        for _ in 0..2000 {
            let raw = codec.action_space().sample(&rng);
            let act = codec.decode_action(&raw)?;
            assert_groups_exclusive(&codec, &act);
            assert!(act.hotbar.map_or(true, |slot| (1..=9).contains(&slot)));
            assert_eq!(codec.decode_action(&codec.encode_action(&act)?)?, act);
        }
    }
    Ok(())
}

#[test]
fn test_shared_between_threads() -> Result<()> {
    let codec = Arc::new(ActionCodec::build(&ActionCodecConfig::default())?);
    let expected: Vec<MinerlAction> = (0..100)
        .map(|i| {
            codec.decode_action(&RawAction::SingleHead {
                main_head: i * 300,
                camera_head: i,
            })
        })
        .collect::<Result<_, _>>()?;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let codec = codec.clone();
            thread::spawn(move || {
                (0..100)
                    .map(|i| {
                        codec
                            .decode_action(&RawAction::SingleHead {
                                main_head: i * 300,
                                camera_head: i,
                            })
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
    Ok(())
}

#[test]
fn test_invalid_configurations() {
    let cases = vec![
        ActionCodecConfig::default().camera_bins(10),
        ActionCodecConfig::default().camera_base(0.5),
        ActionCodecConfig::default().groups(vec![]),
        ActionCodecConfig::default().groups(vec![ActionGroup::new(vec![])]),
        ActionCodecConfig::default().hotbar_slots(8),
        ActionCodecConfig::default().groups(vec![
            ActionGroup::single(Control::Hotbar(1)),
            ActionGroup::single(Control::Hotbar(2)),
        ]),
    ];
    for config in cases.iter() {
        assert!(matches!(
            ActionCodec::build(config),
            Err(CodecError::Configuration(_))
        ));
    }
}
