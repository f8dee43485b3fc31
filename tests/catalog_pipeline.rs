use std::collections::HashMap;

use chrono::NaiveDate;
use match_catalog_lib::logos::LogoFile;
use match_catalog_lib::{build_catalogs, Lookups};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn logo(league: &str, team: &str) -> LogoFile {
    LogoFile {
        league: league.to_string(),
        team: team.to_string(),
        url: format!("https://logos.test/{}.png", team.replace(' ', "_")),
    }
}

const DEFAULT_BALL: &str = "https://i.ibb.co/2vhFM7h/soccer-ball-variant.png";

#[test]
fn test_two_channels_one_match() {
    let playlist = "#EXTM3U\n\
        #EXTINF:-1 tvg-logo=\"https://img.test/a.png\" group-title=\"Eventos\",21:00 LaLiga - Real Madrid - Barcelona\n\
        acestream://abc123\n\
        #EXTINF:-1 tvg-logo=\"https://img.test/b.png\" group-title=\"Eventos\",21:00 LaLiga - Real Madrid - Barcelona\n\
        acestream://def456\n";

    let mut channel_names = HashMap::new();
    channel_names.insert("abc123".to_string(), "M+ LaLiga".to_string());
    let lookups = Lookups::builtin(
        &[logo("Spain - LaLiga", "Real Madrid"), logo("Spain - LaLiga", "FC Barcelona")],
        channel_names,
    );

    let run = build_catalogs(playlist, &lookups, run_date());

    assert_eq!(run.catalogs.primary.len(), 1);
    assert!(run.catalogs.secondary.is_empty());

    let m = &run.catalogs.primary[0];
    assert_eq!(m.home_team, "Real Madrid");
    assert_eq!(m.away_team, "Barcelona");
    assert_eq!(m.links.len(), 2);
    assert_eq!(m.channels.len(), 2);
    assert_eq!(m.channels, vec!["M+ LaLiga", "Stream def456"]);
    assert_eq!(m.links[1].stream_id, "def456");
    assert_eq!(m.primary_link, "acestream://abc123");
    assert_eq!(m.home_logo, "https://logos.test/Real_Madrid.png");
    // "Barcelona" reaches the "FC Barcelona" logo through the alias table
    assert_eq!(m.away_logo, "https://logos.test/FC_Barcelona.png");
}

#[test]
fn test_first_seen_order_not_sorted() {
    let playlist = "\
        #EXTINF:-1,22:00 Serie A - Roma - Lazio\n\
        acestream://a1\n\
        #EXTINF:-1,14:00 Bundesliga - Mainz - Köln\n\
        acestream://b1\n\
        #EXTINF:-1,22:00 Serie A - Roma - Lazio\n\
        acestream://a2\n";

    let run = build_catalogs(playlist, &Lookups::default(), run_date());
    let order: Vec<_> = run
        .catalogs
        .primary
        .iter()
        .map(|m| m.home_team.as_str())
        .collect();
    assert_eq!(order, vec!["Roma", "Mainz"]);
    assert_eq!(run.catalogs.primary[0].links.len(), 2);
}

#[test]
fn test_dangling_metadata_contributes_nothing() {
    let playlist = "\
        #EXTINF:-1,21:00 LaLiga - Girona - Getafe\n\
        acestream://g1\n\
        #EXTINF:-1,23:00 LaLiga - Elche - Levante";

    let run = build_catalogs(playlist, &Lookups::default(), run_date());
    assert_eq!(run.catalogs.total_matches(), 1);
    assert_eq!(run.stats.entries_skipped, 1);
    assert_eq!(run.catalogs.primary[0].home_team, "Girona");
}

#[test]
fn test_excluded_competitions_go_secondary() {
    let playlist = "\
        #EXTINF:-1,12:00 LIGA FEM SUB-19 - Levante - Sevilla\n\
        acestream://f1\n\
        #EXTINF:-1,18:00 Premier League - Arsenal - Chelsea\n\
        acestream://p1\n\
        #EXTINF:-1,20:00 Liga ACB - Unicaja - Baskonia\n\
        acestream://k1\n";

    let run = build_catalogs(playlist, &Lookups::builtin(&[], HashMap::new()), run_date());

    let secondary: Vec<_> = run
        .catalogs
        .secondary
        .iter()
        .map(|m| m.competition.as_str())
        .collect();
    assert_eq!(secondary, vec!["LIGA FEM SUB-19", "Liga ACB"]);
    assert_eq!(run.catalogs.primary.len(), 1);
    assert_eq!(run.catalogs.primary[0].competition, "Premier League");
}

#[test]
fn test_malformed_lines_never_abort() {
    let playlist = "\
        garbage line\n\
        #EXTINF:-1\n\
        #EXTINF:-1,99:99 Broken - A - B\n\
        acestream://x\n\
        #EXTINF:-1 tvg-logo=\"unterminated,20:45 Ligue 1 - PSG - OM\n\
        acestream://ok1\n\
        acestream://orphan\n\
        #EXTINF:-1,20:45 Ligue 1 - PSG - OM\n\
        http://not-a-stream\n";

    let run = build_catalogs(playlist, &Lookups::builtin(&[], HashMap::new()), run_date());

    assert_eq!(run.stats.entries_parsed, 1);
    assert_eq!(run.stats.entries_skipped, 3);
    let m = &run.catalogs.primary[0];
    assert_eq!(m.home_team, "PSG");
    assert_eq!(m.away_team, "OM");
    assert_eq!(m.home_logo, DEFAULT_BALL);
}

#[test]
fn test_links_and_channels_stay_parallel() {
    let mut playlist = String::new();
    for (i, (home, away)) in [("A", "B"), ("C", "D"), ("A", "B"), ("E", ""), ("A", "B")]
        .iter()
        .enumerate()
    {
        let title = if away.is_empty() {
            format!("Cup - {}", home)
        } else {
            format!("Cup - {} - {}", home, away)
        };
        playlist.push_str(&format!("#EXTINF:-1,10:00 {}\nacestream://id{}\n", title, i));
    }

    let run = build_catalogs(&playlist, &Lookups::default(), run_date());
    assert_eq!(run.catalogs.primary.len(), 3);
    for m in &run.catalogs.primary {
        assert!(!m.links.is_empty());
        assert_eq!(m.links.len(), m.channels.len());
    }
    assert_eq!(run.catalogs.primary[0].links.len(), 3);
    assert_eq!(run.catalogs.primary[2].away_team, "");
}

#[test]
fn test_catalog_json_shape() {
    let playlist = "#EXTINF:-1,21:00 LaLiga - Betis - Sevilla\nacestream://abc123\n";
    let run = build_catalogs(playlist, &Lookups::default(), run_date());

    let json = serde_json::to_string(&run.catalogs.primary).unwrap();
    let expected_order = [
        "\"time\"", "\"date\"", "\"home_team\"", "\"away_team\"", "\"home_logo\"",
        "\"away_logo\"", "\"competition\"", "\"channels\"", "\"links\"", "\"link\"",
    ];
    let mut last = 0;
    for key in expected_order {
        let pos = json[last..].find(key).map(|p| p + last);
        assert!(pos.is_some(), "{} missing or out of order in {}", key, json);
        last = pos.unwrap() + key.len();
    }
    assert!(json.contains("\"acestream_id\":\"abc123\""));
}
