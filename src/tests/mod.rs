use crate::{KnownWikis, Resolution, RuleSet, Title, resolve};
use goldenfile::Mint;
use std::io::Write as _;

const BASE_DIR: &str = "./src/tests";

/// Titles, namespaces, and query strings for the golden resolution test.
const CASES: &[(&str, &str, &str)] = &[
    ("farm:acme:Main_Page", "", ""),
    ("farm:en.acme:Main_Page", "", ""),
    ("trans:acme:Page", "", "action=raw"),
    ("trans:acme:Page", "", "action=view"),
    ("checked:acme:Page", "", ""),
    ("checked:other:Page", "", ""),
    ("gg:terraria:Guide", "", ""),
    ("gg:de.terraria:Führer", "", ""),
    ("gg:fr.terraria:Guide", "", ""),
    ("gg:Minecraft:Talk:Mobs", "", ""),
    ("gg:terraria:Guide", "Talk", ""),
    ("gg:terraria:Moon  lord", "", ""),
    ("w:c_en.starwars:Yoda", "", ""),
    ("w:starwars:Yoda", "", ""),
    ("w:c:starwars", "", ""),
    ("old:acme:A&B", "", "action=edit"),
    ("wikipedia:Main_Page", "", ""),
    ("farm:a.b", "", ""),
    ("farm:", "", ""),
];

fn fixtures() -> (RuleSet, KnownWikis) {
    let _ = env_logger::try_init();
    let rules = RuleSet::from_file(format!("{BASE_DIR}/farms.json")).unwrap();
    let known = KnownWikis::from_dblist_file(format!("{BASE_DIR}/all.dblist")).unwrap();
    (rules, known)
}

#[test]
fn golden() {
    let (rules, known) = fixtures();
    let mut mint = Mint::new(format!("{BASE_DIR}/golden"));
    let mut file = mint.new_goldenfile("resolve.txt").unwrap();

    for (text, namespace, query) in CASES {
        let title = Title::new(text, namespace);
        let outcome = match rules.iter().find(|rule| rule.interwiki == title.interwiki()) {
            Some(rule) => match rule.resolve(&title, query, &known) {
                Resolution::Rewritten(url) => url,
                Resolution::Declined(reason) => format!("declined: {reason}"),
            },
            None => "no rule".into(),
        };
        writeln!(file, "{title} [{query}] => {outcome}").unwrap();
    }
}

#[track_caller]
fn run_test(text: &str, query: &str, expected: Option<&str>) {
    let (rules, known) = fixtures();
    let title = Title::new(text, "");
    assert_eq!(
        resolve(&title, query, &rules, &known).as_deref(),
        expected,
        "{text} [{query}]"
    );
}

macro_rules! test_resolve {
    ($($ident:ident => ($title:literal, $query:literal) => $expected:expr),* $(,)?) => {
        $(#[test]
        fn $ident() {
            run_test($title, $query, $expected);
        })*
    }
}

test_resolve! {
    plain_link => ("farm:acme:Main_Page", "") => Some("https://acme.example.org/wiki/Main_Page"),
    language_without_template => ("farm:en.acme:Main_Page", "") => None,
    trans_only_raw => ("trans:acme:Main_Page", "action=raw") => None,
    trans_only_render => ("trans:acme:Main_Page", "ctype=x&action=render") => None,
    known_wiki => ("checked:acme:Page", "") => Some("https://acme.example.org/wiki/Page"),
    unknown_wiki => ("checked:other:Page", "") => None,
    subprefix => ("w:c_en.starwars:Yoda", "") => Some("https://starwars.fandom.com/en/wiki/Yoda"),
    missing_subprefix => ("w:starwars:Yoda", "") => None,
    other_interwiki => ("wikipedia:Main_Page", "") => None,
}
