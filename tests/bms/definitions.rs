use bms_grammar::bms::{
    BmsError,
    command::ObjId,
    default_config,
    definition::{ArgKind, DefValue, DefinitionTable},
    lex::{LexError, TokenStream, token::Token},
    parse_bms,
};
use pretty_assertions::assert_eq;

#[test]
fn player() {
    let bms = parse_bms("#player 1", &default_config()).unwrap();
    assert_eq!(bms.metadata.player, Some(1));
    assert_eq!(bms.metadata.player(), 1);

    let err = parse_bms("#player 10", &default_config()).unwrap_err();
    let BmsError::Lex(err) = err else {
        panic!("expected a lex error, but got {err:?}");
    };
    assert_eq!(
        err.content(),
        &LexError::OutOfDomain {
            keyword: "player".to_string(),
            value: "10".to_string(),
            expected: "one of 1, 2, 3".to_string(),
        }
    );
    assert_eq!(err.as_span(), (1, 10));
}

#[test]
fn genre_keeps_non_ascii() {
    let bms = parse_bms("#GENRE 音楽", &default_config()).unwrap();
    assert_eq!(bms.metadata.genre(), "音楽");
    assert_eq!(bms.metadata.genre.as_deref(), Some("音楽"));
}

#[test]
fn wav_ignores_case() {
    let bms = parse_bms("#wAvaF foo.wav", &default_config()).unwrap();
    assert_eq!(
        bms.resources.wav.get(&ObjId::from(0xAF)).map(String::as_str),
        Some("foo.wav")
    );
    assert!(bms.resources.bmp.is_empty());
}

#[test]
fn resource_names_are_verbatim() {
    let bms = parse_bms(
        "#BMP0a  背景 image.BMP\n#WAVff\tsounds/キック.ogg ",
        &default_config(),
    )
    .unwrap();
    assert_eq!(
        bms.resources.bmp.get(&ObjId::from(0x0A)).map(String::as_str),
        Some(" 背景 image.BMP")
    );
    assert_eq!(
        bms.resources.wav.get(&ObjId::from(0xFF)).map(String::as_str),
        Some("sounds/キック.ogg ")
    );
}

#[test]
fn integer_fields() {
    let bms = parse_bms(
        "#BPM 180\n#PLAYLEVEL 12\n#RANK 3\n#VOLWAV 100\n#TITLE x\n#ARTIST y\n#MIDIFILE bgm.mid",
        &default_config(),
    )
    .unwrap();
    let metadata = &bms.metadata;
    assert_eq!(
        (metadata.bpm(), metadata.playlevel(), metadata.rank(), metadata.volwav()),
        (180, 12, 3, 100)
    );
    assert_eq!((metadata.title(), metadata.artist()), ("x", "y"));
    assert_eq!(metadata.midifile(), Some("bgm.mid"));
    assert_eq!(metadata.get("BPM"), Some(DefValue::Integer(180)));
    assert_eq!(metadata.get("title"), Some(DefValue::Text("x".into())));
    assert_eq!(metadata.get("genre"), None);
}

#[test]
fn domain_violations() {
    for (source, expected) in [
        ("#RANK 4", "one of 0, 1, 2, 3"),
        ("#PLAYER 0", "one of 1, 2, 3"),
        ("#VOLWAV 1000", "at most 3 digits"),
        ("#BPM 99999999999999999999", "a 64-bit integer"),
    ] {
        let Err(BmsError::Lex(err)) = parse_bms(source, &default_config()) else {
            panic!("{source} must fail");
        };
        let LexError::OutOfDomain { expected: actual, .. } = err.into_content() else {
            panic!("{source} must be out of domain");
        };
        assert_eq!(actual, expected, "{source}");
    }
}

#[test]
fn separator_is_required() {
    for source in ["#TITLE", "#TITLEfoo", "#PLAYER1", "#BPM x", "#WAV01", "#WAV01foo.wav"] {
        let Err(BmsError::Lex(err)) = parse_bms(source, &default_config()) else {
            panic!("{source} must fail");
        };
        assert!(
            matches!(err.content(), LexError::UnknownCommand { .. }),
            "{source}: {err:?}"
        );
    }
}

#[test]
fn custom_table() {
    let table: DefinitionTable = "title#text\nsubtitle#text\nlevel#int 2\nmode#enum 5 7 9"
        .parse()
        .unwrap();
    assert_eq!(table.get("MODE"), Some(&ArgKind::Enum(vec![5, 7, 9])));
    let config = default_config().definitions(&table);

    let bms = parse_bms("#SUBTITLE -another-\n#LEVEL 12\n#MODE 7\n#TITLE t", &config).unwrap();
    assert_eq!(bms.metadata.title(), "t");
    assert_eq!(
        bms.metadata.get("subtitle"),
        Some(DefValue::Text("-another-".into()))
    );
    assert_eq!(bms.metadata.get("level"), Some(DefValue::Integer(12)));
    assert_eq!(bms.metadata.get("mode"), Some(DefValue::Integer(7)));

    assert!(parse_bms("#LEVEL 123", &config).is_err());
    assert!(parse_bms("#PLAYER 1", &config).is_err());
}

#[test]
fn longest_keyword_wins() {
    let table: DefinitionTable = "title#text\ntitlex#int".parse().unwrap();
    let grammar = default_config().definitions(&table).grammar();
    let tokens = TokenStream::parse_lex("#TITLEX 5\n#TITLE X 5", &grammar).unwrap();
    assert_eq!(
        tokens.commands().cloned().collect::<Vec<_>>(),
        vec![
            Token::Definition {
                keyword: "TITLEX".into(),
                value: DefValue::Integer(5),
            },
            Token::Definition {
                keyword: "TITLE".into(),
                value: DefValue::Text("X 5".into()),
            },
        ]
    );
}
