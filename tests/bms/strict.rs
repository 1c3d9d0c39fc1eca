use std::collections::BTreeSet;

use bms_grammar::bms::{
    BmsError, StrictFlag,
    command::{ObjId, channel::Channel, time::Track},
    default_config,
    parse::duplicates::DuplicateDefinitions,
    parse_bms,
};
use pretty_assertions::assert_eq;

fn strict_error(source: &str) -> DuplicateDefinitions {
    let config = default_config().strict(StrictFlag::DuplicateDefinition);
    match parse_bms(source, &config) {
        Err(BmsError::Duplicate(duplicates)) => duplicates,
        other => panic!("expected duplicates, but got {other:?}"),
    }
}

#[test]
fn player_twice() {
    let source = "#player 1\n#player 2";
    assert_eq!(
        strict_error(source),
        DuplicateDefinitions {
            definitions: ["player".to_string()].into(),
            ..Default::default()
        }
    );

    let bms = parse_bms(source, &default_config()).unwrap();
    assert_eq!(bms.metadata.player(), 2);
    assert_eq!(bms.commands.len(), 2);
}

#[test]
fn keys_are_case_folded() {
    let duplicates = strict_error("#TITLE a\n#Title b\n#genre x\n#GENRE y\n#ARTIST only");
    assert_eq!(
        duplicates.definitions,
        ["genre".to_string(), "title".to_string()].into()
    );
}

#[test]
fn first_assignment_of_default_value_is_not_duplicate() {
    let config = default_config().strict(StrictFlag::DuplicateDefinition);
    let bms = parse_bms("#PLAYER 1\n#BPM 130\n#RANK 0\n#VOLWAV 100", &config).unwrap();
    assert_eq!(bms.metadata.bpm, Some(130));
}

#[test]
fn resources_and_messages() {
    let duplicates = strict_error(concat!(
        "#WAV01 a.wav\n#wav01 b.wav\n#BMP01 a.bmp\n#BMPAA x.bmp\n#bmpaa y.bmp\n",
        "#00111:01\n#00112:01\n#00111:02\n#00211:01",
    ));
    assert_eq!(duplicates.definitions, BTreeSet::new());
    assert_eq!(duplicates.wav, [ObjId::from(0x01)].into());
    assert_eq!(duplicates.bmp, [ObjId::from(0xAA)].into());
    assert_eq!(
        duplicates.messages,
        [(Track::new(1).unwrap(), Channel::try_from("11").unwrap())].into()
    );
}

#[test]
fn collects_until_end() {
    let duplicates =
        strict_error("#BPM 120\n#BPM 140\n#BPM 160\n#TITLE t\n#00311:01\n#TITLE u\n#00311:02");
    assert_eq!(
        duplicates.definitions,
        ["bpm".to_string(), "title".to_string()].into()
    );
    assert_eq!(duplicates.messages.len(), 1);
    assert_eq!(
        duplicates.to_string(),
        "duplicated definitions: #BPM, #TITLE, #00311"
    );
}

#[test]
fn lenient_keeps_last_write() {
    let bms = parse_bms(
        "#BPM 120\n#BPM 140\n#WAV01 a.wav\n#WAV01 b.wav\n#00111:01\n#00111:0203",
        &default_config(),
    )
    .unwrap();
    assert_eq!(bms.metadata.bpm(), 140);
    assert_eq!(
        bms.resources.wav.get(&ObjId::from(1)).map(String::as_str),
        Some("b.wav")
    );
    assert_eq!(
        bms.timeline
            .get(Track::new(1).unwrap(), Channel::try_from("11").unwrap()),
        Some([0x02, 0x03].as_slice())
    );
}
