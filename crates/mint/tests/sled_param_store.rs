use ippan_mint::{
    DistributionProportions, ErrorKind, MintConfig, MintKeeper, Minter, Params, WeightedAddress,
};
use ippan_storage::{KvStore, SledKvStore};
use ippan_types::{encode_address, Ratio};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> SledKvStore {
    SledKvStore::open(dir.path().join("state"), "modules").unwrap()
}

fn sample_params() -> Params {
    Params::new(
        "uipn",
        DistributionProportions::new(Ratio::from_percent(25), Ratio::from_percent(50)),
        vec![
            WeightedAddress::new(encode_address(&[7; 32]), Ratio::from_percent(80)),
            WeightedAddress::new(encode_address(&[8; 32]), Ratio::from_percent(20)),
        ],
    )
}

#[test]
#[should_panic(expected = "stored minter should not have been nil")]
fn get_minter_panics_on_fresh_store() {
    let dir = TempDir::new().unwrap();
    let keeper = MintKeeper::new(open_store(&dir), MintConfig::default());
    keeper.get_minter();
}

#[test]
fn initialized_records_read_back() {
    let dir = TempDir::new().unwrap();
    let keeper = MintKeeper::new(open_store(&dir), MintConfig::default());
    let minter = Minter::new(Ratio::from_percent(13), "12500.25".parse().unwrap());

    keeper.initialize(&minter, &sample_params()).unwrap();

    assert_eq!(keeper.get_minter(), minter);
    assert_eq!(keeper.get_params().unwrap(), sample_params());
}

#[test]
fn unset_params_read_as_zero_value() {
    let dir = TempDir::new().unwrap();
    let keeper = MintKeeper::new(open_store(&dir), MintConfig::default());
    assert_eq!(keeper.get_params().unwrap(), Params::default());
    assert!(keeper.try_get_minter().unwrap().is_none());
}

#[test]
fn rejected_params_keep_previous_record() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let keeper = MintKeeper::new(&store, MintConfig::default());
    keeper.set_params(&sample_params()).unwrap();
    let raw_before = store.get(b"mint/\x01").unwrap();

    let mut bad = sample_params();
    bad.funded_addresses[1].weight = Ratio::from_percent(10);
    let err = keeper.set_params(&bad).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(store.get(b"mint/\x01").unwrap(), raw_before);
    assert_eq!(keeper.get_params().unwrap(), sample_params());
}

#[test]
fn unauthorized_update_is_refused() {
    let dir = TempDir::new().unwrap();
    let keeper = MintKeeper::new(open_store(&dir), MintConfig::default());

    let err = keeper
        .update_params(&encode_address(&[9; 32]), &sample_params())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(keeper.get_params().unwrap(), Params::default());
}

#[test]
fn prefixes_isolate_keepers_sharing_a_store() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let config = MintConfig::from_toml_str("store_prefix = \"mint-shadow\"\n").unwrap();

    let primary = MintKeeper::new(&store, MintConfig::default());
    let shadow = MintKeeper::new(&store, config);

    primary.set_params(&sample_params()).unwrap();
    assert_eq!(shadow.get_params().unwrap(), Params::default());

    shadow.set_minter(&Minter::initial(Ratio::from_percent(7))).unwrap();
    assert!(primary.try_get_minter().unwrap().is_none());
}

#[test]
fn records_survive_flush() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let keeper = MintKeeper::new(&store, MintConfig::default());
    keeper.initialize(&Minter::default(), &sample_params()).unwrap();
    store.flush().unwrap();

    let reader = MintKeeper::new(&store, MintConfig::default());
    assert_eq!(reader.get_minter(), Minter::default());
    assert_eq!(reader.get_params().unwrap(), sample_params());
}
