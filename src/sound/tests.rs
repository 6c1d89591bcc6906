// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::sync::Arc;

use super::*;
use crate::playback::mock::{EngineEvent, MockEngine};
use crate::playback::Channel;
use crate::storage::mock::MockStorage;

const FONT_FILES: [&str; 18] = [
    "font.wav",
    // Boot is counted as boot01.wav but played as boot.wav.
    "boot.wav",
    "boot01.wav",
    "out01.wav",
    "out02.wav",
    "in01.wav",
    "hum01.wav",
    "hum02.wav",
    "lock01.wav",
    "clsh01.wav",
    "clsh02.wav",
    "clsh03.wav",
    "swng01.wav",
    "swng02.wav",
    "blst01.wav",
    "blst02.wav",
    "blst03.wav",
    "blst04.wav",
];

/// Storage holding a complete first and second font, and a font with only a hum.
fn test_storage() -> Arc<MockStorage> {
    let mut files: Vec<String> = Vec::new();
    for dir in ["necfont1", "necfont2"] {
        files.extend(FONT_FILES.iter().map(|file| format!("{}/{}", dir, file)));
    }
    files.push("ifont1/hum01.wav".to_string());
    Arc::new(MockStorage::new(files))
}

fn test_manager() -> (SoundFontManager, MockEngine) {
    let storage = test_storage();
    let engine = MockEngine::new("mock").with_storage(storage.clone());
    let manager = SoundFontManager::with_seed(storage, Box::new(engine.clone()), 7);
    (manager, engine)
}

fn test_tuning_layer() -> (TuningLayer, MockEngine) {
    let (manager, engine) = test_manager();
    (TuningLayer::new(manager), engine)
}

fn position(events: &[EngineEvent], event: &EngineEvent) -> usize {
    events
        .iter()
        .position(|e| e == event)
        .unwrap_or_else(|| panic!("{:?} not found in {:?}", event, events))
}

fn effect_clip(engine: &MockEngine) -> u64 {
    engine.routed(Channel::Effect).expect("effect clip routed")
}

fn sustain_clip(engine: &MockEngine) -> u64 {
    engine.routed(Channel::Sustain).expect("sustain clip routed")
}

#[test]
fn test_set_font_discovers_and_starts_font() {
    let (mut manager, engine) = test_manager();
    manager.init();
    assert_eq!(SlotState::Empty, manager.sustain_state());
    assert_eq!(SlotState::Empty, manager.effect_state());

    manager.set_font(1).unwrap();

    let font = manager.inventory().unwrap();
    assert_eq!("necfont2", font.base_dir());
    assert_eq!(Some(1), manager.active_font());
    assert_eq!(1, font.count(SoundCategory::FontId));
    assert_eq!(2, font.count(SoundCategory::Hum));
    assert_eq!(3, font.count(SoundCategory::Clash));
    assert_eq!(4, font.count(SoundCategory::Blaster));
    assert_eq!(0, font.count(SoundCategory::Force));

    let hum = engine.clip(sustain_clip(&engine)).unwrap();
    assert_eq!("necfont2/hum01.wav", hum.path);
    assert!(hum.looping);

    let font_id = engine.clip(effect_clip(&engine)).unwrap();
    assert_eq!("necfont2/font.wav", font_id.path);
    assert!(!font_id.looping);

    assert_eq!(SlotState::Playing, manager.sustain_state());
    assert_eq!(SlotState::Playing, manager.effect_state());
    assert_eq!(Some(SoundCategory::FontId), manager.effect_category());
}

#[test]
fn test_set_font_releases_previous_font() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    let first_hum = sustain_clip(&engine);
    let first_font_id = effect_clip(&engine);

    manager.set_font(1).unwrap();
    assert!(engine.clip(first_hum).unwrap().closed);
    assert!(engine.clip(first_font_id).unwrap().closed);
    assert_eq!(2, engine.open_clips());
}

#[test]
fn test_set_font_dir_name_base() {
    let (mut manager, engine) = test_manager();
    manager.set_font_dir_name_base("ifont");
    assert_eq!("ifont", manager.font_dir_name_base());

    // The hum starts but the font has no identification sound.
    let result = manager.set_font(0);
    assert!(matches!(
        result,
        Err(SoundError::MissingAsset { path }) if path == "ifont1/font.wav"
    ));
    assert_eq!("ifont1", manager.inventory().unwrap().base_dir());
    assert_eq!(1, manager.inventory().unwrap().count(SoundCategory::Hum));
    assert_eq!(
        "ifont1/hum01.wav",
        engine.clip(sustain_clip(&engine)).unwrap().path
    );
    assert_eq!(SlotState::Empty, manager.effect_state());
}

#[test]
fn test_fast_path_reuses_clip() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    manager.play_sound(SoundCategory::Clash, 0).unwrap();
    let clash = effect_clip(&engine);
    let open_clips = engine.open_clips();

    engine.clear_events();
    manager.play_sound(SoundCategory::Clash, 2).unwrap();

    assert_eq!(vec![EngineEvent::Seek { clip: clash }], engine.events());
    assert_eq!(clash, effect_clip(&engine));
    assert_eq!(open_clips, engine.open_clips());
}

#[test]
fn test_fast_path_not_taken_after_clip_ends() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    manager.play_sound(SoundCategory::Swing, 0).unwrap();
    let swing = effect_clip(&engine);

    engine.finish(swing);
    assert_eq!(SlotState::Loaded, manager.effect_state());
    manager.play_sound(SoundCategory::Swing, 1).unwrap();

    let next = effect_clip(&engine);
    assert_ne!(swing, next);
    assert_eq!("necfont1/swng02.wav", engine.clip(next).unwrap().path);
    assert!(engine.clip(swing).unwrap().closed);
}

#[test]
fn test_fast_path_only_for_high_performance_categories() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    manager.play_sound(SoundCategory::PowerUp, 0).unwrap();
    let first = effect_clip(&engine);

    manager.play_sound(SoundCategory::PowerUp, 1).unwrap();
    let second = effect_clip(&engine);
    assert_ne!(first, second);
    assert!(engine.clip(first).unwrap().closed);
}

#[test]
fn test_switching_effect_pauses_then_releases() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    manager.play_sound(SoundCategory::Swing, 0).unwrap();
    let swing = effect_clip(&engine);

    engine.clear_events();
    manager.play_sound(SoundCategory::Clash, 0).unwrap();
    let clash = effect_clip(&engine);
    assert_ne!(swing, clash);

    let events = engine.events();
    let open = position(
        &events,
        &EngineEvent::Open {
            clip: clash,
            path: "necfont1/clsh01.wav".to_string(),
        },
    );
    let pause = position(&events, &EngineEvent::Pause { clip: swing });
    let route = position(
        &events,
        &EngineEvent::Route {
            channel: Channel::Effect,
            clip: Some(clash),
        },
    );
    let close = position(&events, &EngineEvent::Close { clip: swing });
    assert!(open < route);
    assert!(pause < route);
    assert!(route < close);

    assert!(!engine.clip(clash).unwrap().looping);
    assert_eq!(Some(SoundCategory::Clash), manager.effect_category());
}

#[test]
fn test_lockup_loops() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    manager.play_sound(SoundCategory::Lockup, 0).unwrap();

    let lockup = engine.clip(effect_clip(&engine)).unwrap();
    assert_eq!("necfont1/lock01.wav", lockup.path);
    assert!(lockup.looping);
}

#[test]
fn test_hum_replaced_on_sustain_slot() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    let old_hum = sustain_clip(&engine);
    let font_id = effect_clip(&engine);

    engine.clear_events();
    manager.play_sound(SoundCategory::Hum, 1).unwrap();
    let new_hum = sustain_clip(&engine);

    let events = engine.events();
    let route = position(
        &events,
        &EngineEvent::Route {
            channel: Channel::Sustain,
            clip: Some(new_hum),
        },
    );
    let close = position(&events, &EngineEvent::Close { clip: old_hum });
    assert!(route < close);
    assert!(!events.contains(&EngineEvent::Pause { clip: old_hum }));

    let hum = engine.clip(new_hum).unwrap();
    assert_eq!("necfont1/hum02.wav", hum.path);
    assert!(hum.looping);
    // The effect slot is untouched.
    assert_eq!(font_id, effect_clip(&engine));
    assert_eq!(Some(SoundCategory::FontId), manager.effect_category());
}

#[test]
fn test_unsupported_category() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    engine.clear_events();

    for category in [
        SoundCategory::Menu,
        SoundCategory::LowSwing,
        SoundCategory::HighSwing,
    ] {
        assert!(matches!(
            manager.play_sound(category, 0),
            Err(SoundError::UnsupportedCategory(c)) if c == category
        ));
    }
    assert!(engine.events().is_empty());
}

#[test]
fn test_missing_asset_leaves_effect_untouched() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    let font_id = effect_clip(&engine);

    engine.clear_events();
    let result = manager.play_sound(SoundCategory::Clash, 9);
    assert!(matches!(
        result,
        Err(SoundError::MissingAsset { path }) if path == "necfont1/clsh10.wav"
    ));
    assert!(engine.events().is_empty());
    assert_eq!(font_id, effect_clip(&engine));
    assert_eq!(SlotState::Playing, manager.effect_state());
    assert_eq!(Some(SoundCategory::FontId), manager.effect_category());
}

#[test]
fn test_play_random_sound() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();

    for _ in 0..20 {
        manager.play_random_sound(SoundCategory::Blaster).unwrap();
        let blaster = engine.clip(effect_clip(&engine)).unwrap();
        assert!(
            [
                "necfont1/blst01.wav",
                "necfont1/blst02.wav",
                "necfont1/blst03.wav",
                "necfont1/blst04.wav"
            ]
            .contains(&blaster.path.as_str()),
            "unexpected clip {}",
            blaster.path
        );
        engine.finish(effect_clip(&engine));
    }
}

#[test]
fn test_play_random_sound_single_clip() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();

    manager.play_random_sound(SoundCategory::Lockup).unwrap();
    assert_eq!(
        "necfont1/lock01.wav",
        engine.clip(effect_clip(&engine)).unwrap().path
    );
}

#[test]
fn test_play_random_sound_empty_category() {
    let (mut manager, engine) = test_manager();

    // No font selected yet.
    assert!(matches!(
        manager.play_random_sound(SoundCategory::Clash),
        Err(SoundError::EmptyCategory(SoundCategory::Clash))
    ));

    manager.set_font(0).unwrap();
    engine.clear_events();
    for category in [SoundCategory::Force, SoundCategory::Menu] {
        assert!(matches!(
            manager.play_random_sound(category),
            Err(SoundError::EmptyCategory(c)) if c == category
        ));
    }
    assert!(engine.events().is_empty());
}

#[test]
fn test_play_before_font_selected_uses_first_font() {
    let (mut manager, engine) = test_manager();
    manager.play_sound(SoundCategory::Boot, 0).unwrap();
    assert_eq!(
        "necfont1/boot.wav",
        engine.clip(effect_clip(&engine)).unwrap().path
    );
}

#[test]
fn test_continue_play() {
    let (mut manager, engine) = test_manager();
    assert!(manager.continue_play(false));

    manager.play_sound(SoundCategory::Clash, 0).unwrap();
    assert!(!manager.continue_play(false));

    engine.finish(effect_clip(&engine));
    assert!(manager.continue_play(true));

    manager.set_font(0).unwrap();
    assert!(!manager.continue_play(false));
}

#[test]
fn test_set_master_volume() {
    let (mut manager, engine) = test_manager();
    manager.set_master_volume(50);
    assert_eq!(0.5, engine.gain());
    manager.set_master_volume(0);
    assert_eq!(0.0, engine.gain());
    manager.set_master_volume(100);
    assert_eq!(1.0, engine.gain());
    manager.set_master_volume(250);
    assert_eq!(1.0, engine.gain());
}

#[test]
fn test_drop_detaches_then_releases() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    let hum = sustain_clip(&engine);
    let font_id = effect_clip(&engine);

    engine.clear_events();
    drop(manager);

    let events = engine.events();
    let detach_effect = position(
        &events,
        &EngineEvent::Route {
            channel: Channel::Effect,
            clip: None,
        },
    );
    let detach_sustain = position(
        &events,
        &EngineEvent::Route {
            channel: Channel::Sustain,
            clip: None,
        },
    );
    let close_font_id = position(&events, &EngineEvent::Close { clip: font_id });
    let close_hum = position(&events, &EngineEvent::Close { clip: hum });
    assert!(detach_effect.max(detach_sustain) < close_font_id.min(close_hum));
    assert_eq!(0, engine.open_clips());
}

#[test]
fn test_failed_set_font_stops_previous_effect() {
    let (mut manager, engine) = test_manager();
    manager.set_font(0).unwrap();
    manager.play_sound(SoundCategory::Swing, 0).unwrap();
    let old_swing = effect_clip(&engine);

    // ifont1 has a hum but no font.wav.
    manager.set_font_dir_name_base("ifont");
    assert!(manager.set_font(0).is_err());

    assert!(engine.clip(old_swing).unwrap().closed);
    assert_eq!(None, engine.routed(Channel::Effect));
    assert_eq!(SlotState::Empty, manager.effect_state());
    assert_eq!(None, manager.effect_category());
    assert!(!manager.is_live(SoundCategory::Swing));
    assert_eq!(
        "ifont1/hum01.wav",
        engine.clip(sustain_clip(&engine)).unwrap().path
    );
}

#[test]
fn test_failed_set_font_stops_previous_hum() {
    let mut storage = (*test_storage()).clone();
    storage.insert("necfont3/font.wav");
    let storage = Arc::new(storage);
    let engine = MockEngine::new("mock").with_storage(storage.clone());
    let mut layer = TuningLayer::new(SoundFontManager::with_seed(
        storage,
        Box::new(engine.clone()),
        7,
    ));

    layer.set_font(0).unwrap();
    layer.set_sound_volume(SoundCategory::Hum, 0.3);
    let old_hum = sustain_clip(&engine);
    assert_eq!(0.3, engine.clip(old_hum).unwrap().volume);

    let result = layer.set_font(2);
    assert!(matches!(
        result,
        Err(SoundError::MissingAsset { path }) if path == "necfont3/hum01.wav"
    ));

    assert_eq!("necfont3", layer.manager().inventory().unwrap().base_dir());
    assert_eq!(TuningOverride::default(), layer.tuning(SoundCategory::Hum));
    assert!(engine.clip(old_hum).unwrap().closed);
    assert_eq!(None, engine.routed(Channel::Sustain));
    assert_eq!(SlotState::Empty, layer.manager().sustain_state());
    assert!(!layer.manager().is_live(SoundCategory::Hum));
    assert_eq!(
        "necfont3/font.wav",
        engine.clip(effect_clip(&engine)).unwrap().path
    );
}

#[test]
fn test_tuning_reset_on_set_font() {
    let (mut layer, _engine) = test_tuning_layer();
    for category in SoundCategory::ALL {
        layer.set_sound_volume(category, 0.25);
        layer.set_sound_pitch(category, 0.5);
    }

    layer.set_font(0).unwrap();
    for category in SoundCategory::ALL {
        assert_eq!(TuningOverride::default(), layer.tuning(category));
    }
    assert_eq!(DEFAULT_VOLUME, layer.tuning(SoundCategory::Hum).volume);
    assert_eq!(DEFAULT_PITCH, layer.tuning(SoundCategory::Hum).pitch);
}

#[test]
fn test_hum_volume_applied_while_live() {
    let (mut layer, engine) = test_tuning_layer();
    layer.set_font(0).unwrap();
    let hum = sustain_clip(&engine);

    engine.clear_events();
    layer.set_sound_volume(SoundCategory::Hum, 0.3);
    assert_eq!(
        vec![EngineEvent::Volume {
            clip: hum,
            volume: 0.3
        }],
        engine.events()
    );
    assert_eq!(0.3, engine.clip(hum).unwrap().volume);
}

#[test]
fn test_hum_volume_latched_while_not_playing() {
    let (mut layer, engine) = test_tuning_layer();
    layer.set_sound_volume(SoundCategory::Hum, 0.3);
    layer.set_sound_pitch(SoundCategory::Hum, -0.2);
    assert!(engine.events().is_empty());
    assert_eq!(0.3, layer.tuning(SoundCategory::Hum).volume);

    layer.play_sound(SoundCategory::Hum, 0).unwrap();
    let hum = engine.clip(sustain_clip(&engine)).unwrap();
    assert_eq!(0.3, hum.volume);
    assert_eq!(-0.2, hum.pitch);
}

#[test]
fn test_effect_tuning_latched_for_other_category() {
    let (mut layer, engine) = test_tuning_layer();
    layer.set_font(0).unwrap();
    layer.play_sound(SoundCategory::Clash, 0).unwrap();
    let clash = effect_clip(&engine);

    layer.set_sound_pitch(SoundCategory::Swing, 0.4);
    assert_eq!(0.0, engine.clip(clash).unwrap().pitch);

    layer.set_sound_pitch(SoundCategory::Clash, 0.1);
    assert_eq!(0.1, engine.clip(clash).unwrap().pitch);

    layer.play_sound(SoundCategory::Swing, 0).unwrap();
    let swing = engine.clip(effect_clip(&engine)).unwrap();
    assert_eq!("necfont1/swng01.wav", swing.path);
    assert_eq!(0.4, swing.pitch);
    assert_eq!(1.0, swing.volume);
}

#[test]
fn test_tuning_reapplied_on_fast_path() {
    let (mut layer, engine) = test_tuning_layer();
    layer.set_font(0).unwrap();
    layer.play_sound(SoundCategory::Blaster, 0).unwrap();
    let blaster = effect_clip(&engine);
    layer.set_sound_volume(SoundCategory::Blaster, 0.6);

    engine.clear_events();
    layer.play_sound(SoundCategory::Blaster, 0).unwrap();
    assert_eq!(
        vec![
            EngineEvent::Seek { clip: blaster },
            EngineEvent::Volume {
                clip: blaster,
                volume: 0.6
            },
            EngineEvent::Rate {
                clip: blaster,
                pitch: 0.0
            },
        ],
        engine.events()
    );
}

#[test]
fn test_tuning_applied_to_random_sound() {
    let (mut layer, engine) = test_tuning_layer();
    layer.set_font(0).unwrap();
    layer.set_sound_volume(SoundCategory::Clash, 0.7);

    layer.play_random_sound(SoundCategory::Clash).unwrap();
    assert_eq!(0.7, engine.clip(effect_clip(&engine)).unwrap().volume);
}

#[test]
fn test_tuning_failed_play_changes_nothing() {
    let (mut layer, engine) = test_tuning_layer();
    layer.set_font(0).unwrap();
    layer.set_sound_volume(SoundCategory::Force, 0.2);

    engine.clear_events();
    assert!(layer.play_sound(SoundCategory::Force, 0).is_err());
    assert!(engine.events().is_empty());
}

#[test]
fn test_tuning_volume_bounds() {
    let (mut layer, _engine) = test_tuning_layer();
    layer.set_sound_volume(SoundCategory::Swing, 1.5);
    assert_eq!(1.0, layer.tuning(SoundCategory::Swing).volume);
    layer.set_sound_volume(SoundCategory::Swing, -1.0);
    assert_eq!(0.0, layer.tuning(SoundCategory::Swing).volume);

    layer.set_sound_volume(SoundCategory::Swing, f32::NAN);
    assert_eq!(0.0, layer.tuning(SoundCategory::Swing).volume);
    layer.set_sound_pitch(SoundCategory::Swing, f32::INFINITY);
    assert_eq!(0.0, layer.tuning(SoundCategory::Swing).pitch);
}
