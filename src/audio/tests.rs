use super::*;
use crate::metadata::Metadata;
use std::time::Duration;

#[test]
fn load_ids_increase_and_differ() {
    let first = LoadId::default();
    let second = first.next();
    assert_ne!(first, second);
    assert!(second > first);
    assert_eq!(second.next(), first.next().next());
}

#[test]
fn every_signal_reports_its_load() {
    let load = LoadId::default().next().next();
    let signals = vec![
        Signal::MetadataReady {
            load,
            duration: Some(Duration::from_secs(3)),
        },
        Signal::PositionTick {
            load,
            position: Duration::from_secs(1),
        },
        Signal::Ended { load },
        Signal::DecodeFailed {
            load,
            reason: "broken".into(),
        },
        Signal::MetadataResolved {
            load,
            index: 0,
            metadata: Metadata::fallback("a.mp3"),
        },
    ];

    for s in signals {
        assert_eq!(s.load(), load);
    }
}
