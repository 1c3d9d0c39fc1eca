use bms_grammar::bms::{
    BmsError, StrictFlag,
    command::{channel::Channel, time::Track},
    default_config,
    lex::{TokenStream, token::Token},
    model::Bms,
    parse_bms,
};
use pretty_assertions::assert_eq;

const SOURCE: &str = concat!(
    "#PLAYER 1\n#GENRE 音楽\n#wAvaF foo.wav\n#BMP01 bg.bmp\n",
    "#09910:20ff\n#RANDOM 2\n#ENDIF",
);

#[test]
fn bms_round_trip() {
    let bms = parse_bms(SOURCE, &default_config()).unwrap();
    let json = serde_json::to_string(&bms).unwrap();
    let restored: Bms = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, bms);
}

#[test]
fn token_json_shape() {
    let tokens = TokenStream::parse_lex("#wAvaF foo.wav", &default_config().grammar()).unwrap();
    let value = serde_json::to_value(tokens.tokens[0].content()).unwrap();
    assert_eq!(value, serde_json::json!({ "Wav": [175, "foo.wav"] }));
    let restored: Token<'static> = serde_json::from_value(value).unwrap();
    assert_eq!(&restored, tokens.tokens[0].content());
}

#[test]
fn errors_are_serializable() {
    let config = default_config().strict(StrictFlag::DuplicateDefinition);
    for source in ["#PLAYER 9", "#TITLE a\n#TITLE b"] {
        let error = parse_bms(source, &config).unwrap_err();
        let json = serde_json::to_string(&error).unwrap();
        let restored: BmsError = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, error);
    }
}

#[test]
fn validated_values_reject_out_of_range() {
    assert!(serde_json::from_str::<Track>("5000").is_err());
    assert!(serde_json::from_str::<Track>("1000").is_err());
    assert!(serde_json::from_str::<Channel>("255").is_err());
    assert!(serde_json::from_str::<Channel>("2").is_err());

    let track: Track = serde_json::from_str("99").unwrap();
    assert_eq!(track, Track::new(99).unwrap());
    assert_eq!(serde_json::to_string(&track).unwrap(), "99");
    let channel: Channel = serde_json::from_str("22").unwrap();
    assert_eq!(channel, Channel::try_from("16").unwrap());
    assert_eq!(serde_json::to_string(&channel).unwrap(), "22");

    let forged = r#"{"Message":{"track":5000,"channel":17,"message":[1]}}"#;
    assert!(serde_json::from_str::<Token<'static>>(forged).is_err());
}
