// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialization, timing and availability of command sequences.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Recorder, dimmer_table};
use irseq_lib::state::{DeviceState, Presence};
use irseq_lib::{
    Device, DeviceConfig, DeviceEvent, LightDevice, LightRequest, PowerControl, PowerState,
    SequenceError, SignalReading,
};
use tokio::time::Instant;

fn lamp(recorder: &Arc<Recorder>, config: DeviceConfig) -> Arc<LightDevice<Arc<Recorder>>> {
    let mut state = DeviceState::initial(&dimmer_table());
    state.set_brightness(10);
    Arc::new(
        Device::builder(config, dimmer_table(), recorder.clone())
            .with_restored_state(state)
            .build_light()
            .unwrap(),
    )
}

#[tokio::test(start_paused = true)]
async fn concurrent_requests_do_not_interleave() {
    let recorder = Recorder::new();
    let lamp = lamp(&recorder, DeviceConfig::new("Lamp", 1));

    let first = {
        let lamp = Arc::clone(&lamp);
        tokio::spawn(async move { lamp.turn_on_with(Some(255), None).await })
    };
    tokio::task::yield_now().await;
    let second = {
        let lamp = Arc::clone(&lamp);
        tokio::spawn(async move { lamp.turn_off().await })
    };

    assert!(first.await.unwrap().is_committed());
    assert!(second.await.unwrap().is_committed());
    assert_eq!(recorder.sent(), vec!["ON", "UP", "UP", "UP", "UP", "OFF"]);
    assert!(!lamp.is_on());
    assert_eq!(lamp.brightness(), Some(255));
}

#[tokio::test(start_paused = true)]
async fn queued_request_resolves_against_committed_state() {
    let recorder = Recorder::new();
    let lamp = lamp(&recorder, DeviceConfig::new("Lamp", 1));

    let (a, b) = tokio::join!(
        lamp.turn_on_with(Some(100), None),
        lamp.turn_on_with(Some(50), None),
    );

    assert!(a.is_committed() && b.is_committed());
    // The second walk starts from 100, where the first one ended
    assert_eq!(recorder.sent(), vec!["ON", "UP", "UP", "DIM"]);
    assert_eq!(lamp.brightness(), Some(50));
}

#[tokio::test(start_paused = true)]
async fn delay_applies_after_each_code() {
    let recorder = Recorder::new();
    let config = DeviceConfig::new("Lamp", 1).with_delay(Duration::from_millis(300));
    let lamp = lamp(&recorder, config);

    let started = Instant::now();
    lamp.turn_on_with(Some(255), None).await;
    assert_eq!(started.elapsed(), Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn devices_do_not_wait_on_each_other() {
    let slow = lamp(
        &Recorder::new(),
        DeviceConfig::new("Slow", 1).with_delay(Duration::from_secs(5)),
    );
    let fast = lamp(
        &Recorder::new(),
        DeviceConfig::new("Fast", 2).with_delay(Duration::from_millis(100)),
    );

    // Each sends "on" and a full walk back down to 10: five codes
    let started = Instant::now();
    let slow_task = {
        let slow = Arc::clone(&slow);
        tokio::spawn(async move { slow.turn_on().await })
    };
    fast.turn_on().await;
    assert_eq!(started.elapsed(), Duration::from_millis(500));
    slow_task.await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(25));
}

#[tokio::test(start_paused = true)]
async fn unavailable_device_rejects_requests() {
    let recorder = Recorder::new();
    let lamp = lamp(&recorder, DeviceConfig::new("Lamp", 1));
    let device = lamp.device();

    assert_eq!(device.availability_signal(SignalReading::Off), Some(false));
    let outcome = lamp.turn_on().await;

    assert_eq!(outcome.reason(), Some(&SequenceError::Unavailable));
    assert!(outcome.reason().unwrap().is_rejection());
    assert!(recorder.sent().is_empty());
    assert_eq!(lamp.view().state, Presence::Unavailable);

    device.availability_signal(SignalReading::On);
    assert!(lamp.turn_on().await.is_committed());
    assert_eq!(recorder.sent(), vec!["ON", "DIM", "DIM", "DIM", "DIM"]);
}

#[tokio::test(start_paused = true)]
async fn request_queued_before_gate_closes_is_rejected() {
    let recorder = Recorder::new();
    let lamp = lamp(&recorder, DeviceConfig::new("Lamp", 1));

    let first = {
        let lamp = Arc::clone(&lamp);
        tokio::spawn(async move { lamp.turn_on_with(Some(255), None).await })
    };
    tokio::task::yield_now().await;
    let second = {
        let lamp = Arc::clone(&lamp);
        tokio::spawn(async move { lamp.turn_off().await })
    };
    tokio::task::yield_now().await;
    lamp.device().availability_signal(SignalReading::Off);

    assert!(first.await.unwrap().is_committed());
    assert_eq!(
        second.await.unwrap().reason(),
        Some(&SequenceError::Unavailable)
    );
    assert!(!recorder.sent().contains(&"OFF".to_string()));
}

#[tokio::test(start_paused = true)]
async fn commits_are_published() {
    let recorder = Recorder::new();
    let lamp = lamp(&recorder, DeviceConfig::new("Lamp", 1));
    let mut events = lamp.device().subscribe();

    lamp.device().submit(&LightRequest::on()).await;

    match events.recv().await.unwrap() {
        DeviceEvent::StateCommitted {
            device_id,
            state,
            transmitted,
        } => {
            assert_eq!(device_id, lamp.device().id());
            assert_eq!(state.power(), PowerState::On);
            assert_eq!(transmitted, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
