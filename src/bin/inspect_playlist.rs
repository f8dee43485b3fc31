use match_catalog_lib::parser::{parse_entry, ParseOutcome, PlaylistFormat, EXTINF_PREFIX};
use match_catalog_lib::sources::decode_playlist;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: inspect_playlist <playlist.m3u> [stream-scheme]");
        std::process::exit(2);
    };
    let format = match std::env::args().nth(2) {
        Some(scheme) => PlaylistFormat {
            stream_scheme: scheme,
            ..Default::default()
        },
        None => PlaylistFormat::default(),
    };

    let text = decode_playlist(&std::fs::read(&path)?)?;
    let lines: Vec<&str> = text.lines().collect();

    println!("=== Playlist Inspection: {} ===\n", path);

    let mut parsed = 0;
    let mut skipped = 0;
    for (idx, line) in lines.iter().enumerate() {
        if !line.trim_start().starts_with(EXTINF_PREFIX) {
            continue;
        }
        match parse_entry(line, lines.get(idx + 1).copied(), &format) {
            ParseOutcome::Parsed(e) => {
                parsed += 1;
                println!(
                    "  ✅ L{:<5} {} | {} | {} vs {} | {}",
                    idx + 1,
                    e.time,
                    e.competition,
                    e.home_team,
                    if e.away_team.is_empty() { "-" } else { e.away_team.as_str() },
                    e.stream_id
                );
            }
            ParseOutcome::Skipped(reason) => {
                skipped += 1;
                println!("  ❌ L{:<5} {}", idx + 1, reason);
                println!("           {}", line.trim());
            }
        }
    }

    println!("\n{} parsed, {} skipped", parsed, skipped);
    Ok(())
}
