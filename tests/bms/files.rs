use bms_grammar::bms::{
    StrictFlag,
    command::{ObjId, channel::Channel, time::Track},
    default_config,
    definition::DefValue,
    parse_bms,
};
use pretty_assertions::assert_eq;

#[test]
fn test_sample() {
    let source = include_str!("files/sample.bms");
    let bms = parse_bms(source, &default_config()).expect("must be parsed");

    assert_eq!(bms.commands.len(), 32);
    assert_eq!(bms.metadata.title(), "Sample Chart");
    assert_eq!(bms.metadata.genre(), "Electronica");
    assert_eq!(bms.metadata.artist(), "bms-grammar");
    assert_eq!(bms.metadata.bpm(), 150);
    assert_eq!(bms.metadata.playlevel(), 7);
    assert_eq!(bms.metadata.rank(), 2);
    assert_eq!(bms.metadata.midifile(), Some("bgm.mid"));
    assert_eq!(bms.metadata.get("random"), Some(DefValue::Integer(2)));
    assert_eq!(bms.metadata.get("if"), Some(DefValue::Integer(2)));

    assert_eq!(bms.resources.wav.len(), 4);
    assert_eq!(
        bms.resources.wav.get(&ObjId::from(0x0A)).map(String::as_str),
        Some("bass c.ogg")
    );
    assert_eq!(bms.resources.bmp.len(), 2);

    assert_eq!(bms.timeline.tracks.len(), 4);
    assert_eq!(
        bms.timeline
            .get(Track::new(0).unwrap(), Channel::try_from("13").unwrap()),
        Some([3; 8].as_slice())
    );
    assert_eq!(
        bms.timeline
            .track(Track::new(3).unwrap())
            .map(|channels| channels.len()),
        Some(2)
    );

    let strict = default_config().strict(StrictFlag::DuplicateDefinition);
    let err = parse_bms(source, &strict).unwrap_err();
    assert!(err.to_string().contains("#IF"), "{err}");
}

#[test]
fn test_japanese_crlf() {
    let source = include_str!("files/japanese.bme");
    let config = default_config().strict(StrictFlag::DuplicateDefinition);
    let bms = parse_bms(source, &config).expect("must be parsed");

    assert_eq!(bms.commands.len(), 13);
    assert_eq!(bms.metadata.player(), 3);
    assert_eq!(bms.metadata.genre(), "音楽");
    assert_eq!(bms.metadata.title(), "テスト曲");
    assert_eq!(bms.metadata.artist(), "作曲者 / obj:譜面");
    assert_eq!(
        bms.resources.wav.get(&ObjId::from(0xAF)).map(String::as_str),
        Some("音/キック.wav")
    );
    assert_eq!(
        bms.resources.bmp.get(&ObjId::from(0x0F)).map(String::as_str),
        Some("背景.bmp")
    );
    assert_eq!(
        bms.timeline
            .get(Track::new(99).unwrap(), Channel::try_from("10").unwrap()),
        Some([0x20, 0xFF].as_slice())
    );
    assert_eq!(
        bms.timeline
            .get(Track::new(0).unwrap(), Channel::try_from("11").unwrap()),
        Some([0xAF, 0x00, 0xAF, 0x00].as_slice())
    );
}
