//! Integration tests for filename and path parsing.
//!
//! Exercises the public parser API with real-world release names.

use shiori::error::Result;
use shiori::parser::{
    has_special_marker, parse, parse_chapter, parse_edition, parse_series, parse_special,
    parse_special_index, parse_volume,
};
use shiori::prelude::*;

mod common;
use common::{LIBRARY_ROOT, SHUFFLE_ROUNDS, random_name};

fn check(label: &str, parse_fn: fn(&str) -> String, cases: &[(&str, &str)]) {
    for (filename, expected) in cases {
        assert_eq!(
            parse_fn(filename),
            *expected,
            "{} mismatch for '{}'",
            label,
            filename
        );
    }
}

#[test]
fn test_parse_volume() {
    check(
        "volume",
        parse_volume,
        &[
            ("Killing Bites Vol. 0001 Ch. 0001 - Galactica Scanlations (gb)", "1"),
            ("Dance in the Vampire Bund v16-17 (Digital) (NiceDragon)", "16-17"),
            ("v001", "1"),
            ("Tonikaku Cawaii [Volume 11].cbz", "11"),
            ("Tower Of God S01 014 (CBT) (digital).cbz", "1"),
            ("Gantz.V26.cbz", "26"),
            ("Kedouin Makoto - Corpse Party Musume, Chapter 12 [Dametrans][v2]", ""),
            ("[Suihei Kiki]_Kasumi_Otoko_no_Ko_[Taruby]_v1.1.zip", "1.1"),
            (
                "Dance in the Vampire Bund {Special Edition} v03.5 (2019) (Digital) (KG Manga)",
                "3.5",
            ),
            ("vol_356-1", "356"),
            ("Accel World Chapter 001 Volume 002", "2"),
            ("Nagasarete Airantou - Vol. 30 Ch. 187.5 - Vol.31 Omake", "30"),
            ("Cynthia The Mission - c000 - c006 (v06)", "6"),
        ],
    );
}

#[test]
fn test_parse_chapter() {
    check(
        "chapter",
        parse_chapter,
        &[
            ("Killing Bites Vol. 0001 Ch. 0001 - Galactica Scanlations (gb)", "1"),
            ("Historys Strongest Disciple Kenichi_v11_c90-98.zip", "90-98"),
            ("Beelzebub_153b_RHS.zip", "153.5"),
            ("Beelzebub_150-153b_RHS.zip", "150-153.5"),
            ("Goblin Slayer Side Story - Year One 017.5", "17.5"),
            ("Cynthia The Mission - c000-006 (v06) [Desudesu&Brolen].zip", "0-6"),
            ("To Love Ru v18 Uncensored (Ch.153-162.5)", "153-162.5"),
            ("Kiss x Sis - Ch.00 - Let's Start from 0.cbz", "0"),
            ("Hinowa ga CRUSH! 018 (2019) (Digital) (LuCaZ).cbz", "18"),
            ("[Suihei Kiki]_Kasumi_Otoko_no_Ko_[Taruby]_v1.12.zip", ""),
            ("Noblesse - Episode 406 (52 Pages).7z", "406"),
            ("Dance in the Vampire Bund v16-17 (Digital) (NiceDragon)", ""),
            ("Accel World Chapter 001 Volume 002", "1"),
            ("Accel World Volume 2", ""),
            ("Nagasarete Airantou - Vol. 30 Ch. 187.5 - Vol.31 Omake", "187.5"),
            ("Bleach 001-003", "1-3"),
        ],
    );
}

#[test]
fn test_parse_chapter_ranges() {
    check(
        "chapter range",
        parse_chapter,
        &[
            ("Historys Strongest Disciple Kenichi c01-c04", "1-4"),
            ("Bleach c12- end", "12"),
            ("Series c5-.cbz", "5"),
            ("Cynthia The Mission - c000 - c006 (v06)", "0"),
        ],
    );
}

#[test]
fn test_non_latin_conventions() {
    let cases = [
        // (name, series, volume, chapter)
        ("Kebab Том 1 Глава 3", "Kebab", "1", "3"),
        ("Манга Тома 1-4", "Манга", "1-4", "1-4"),
        ("Манга Том 1 2 Глава", "Манга", "1", "2"),
        ("Манга Глава 2", "Манга", "", "2"),
        ("Series 몰루 7.5권", "Series 몰루", "7.5", "7"),
    ];
    for (name, series, volume, chapter) in cases {
        assert_eq!(parse_series(name), series, "series for '{}'", name);
        assert_eq!(parse_volume(name), volume, "volume for '{}'", name);
        assert_eq!(parse_chapter(name), chapter, "chapter for '{}'", name);
    }

    assert_eq!(parse_series("Max Level Returner เล่มที่ 5"), "Max Level Returner");
    assert_eq!(parse_volume("Max Level Returner เล่มที่ 5"), "5");
    assert_eq!(parse_volume("죽음 13회"), "13");
    assert_eq!(parse_chapter("자유록 13회#2"), "13");
    assert_eq!(
        parse_chapter("เด็กคนนี้ขอลาออกจากการเป็นเจ้าของปราสาท เล่ม 1 ตอนที่ 3"),
        "3"
    );
}

#[test]
fn test_parse_series() {
    check(
        "series",
        parse_series,
        &[
            ("Killing Bites Vol. 0001 Ch. 0001 - Galactica Scanlations (gb)", "Killing Bites"),
            ("B_Gata_H_Kei_v01[SlowManga&OverloadScans]", "B Gata H Kei"),
            ("Vol 1.cbz", ""),
            ("Chrno_Crusade_Dragon_Age_All_Stars[AS].zip", ""),
            ("Love Hina - Special.cbz", ""),
            (
                "[dmntsf.net] One Piece - Digital Colored Comics Vol. 20 Ch. 177 - 30 Million vs 81 Million.cbz",
                "One Piece - Digital Colored Comics",
            ),
            (
                "Knights of Sidonia c000 (S2 LE BD Omake - BLAME!) [Habanero Scans]",
                "Knights of Sidonia",
            ),
            ("Akame ga KILL! ZERO (2016-2019) (Digital) (LuCaZ)", "Akame ga KILL! ZERO"),
            ("Kodoja #001 (March 2016)", "Kodoja"),
            ("v001", ""),
            ("Accel World Chapter 001 Volume 002", "Accel World"),
            ("Accel World: Vol 1", "Accel World"),
            ("Nagasarete Airantou - Vol. 30 Ch. 187.5 - Vol.31 Omake", "Nagasarete Airantou"),
            ("Cynthia The Mission - c000 - c006 (v06)", "Cynthia The Mission"),
            ("Bleach 001-003", "Bleach"),
        ],
    );
}

#[test]
fn test_parse_edition() {
    check(
        "edition",
        parse_edition,
        &[
            ("Chobits Omnibus Edition v01 [Dark Horse]", "Omnibus Edition"),
            ("Tenjou Tenge {Full Contact Edition}", "Full Contact Edition"),
            ("To Love Ru v01 Uncensored (Ch.001-007)", "Uncensored"),
            ("Dorohedoro v01", ""),
        ],
    );
}

#[test]
fn test_parse_special() {
    let specials = [
        "Beelzebub Special OneShot - Minna no Kochikame x Beelzebub (2016) [Mangastream].cbz",
        "Beelzebub_Omake_June_2012_RHS",
        "Darker than Black Shikkoku no Hana Special [Simple Scans].zip",
        "Ani-Hina Art Collection.cbz",
        "A Town Where You Live - Bonus Chapter.zip",
    ];
    for name in specials {
        assert!(!parse_special(name).is_empty(), "expected special: '{}'", name);
    }
    assert!(parse_special("Beelzebub_Side_Story_02_RHS.zip").is_empty());
    assert!(parse_special("The League of Extra-ordinary Gentlemen").is_empty());
    assert!(parse_special("Dr. Ramune - Mysterious Disease Specialist v01").is_empty());
    assert_eq!(
        parse_special("Darker than Black Shikkoku no Hana Fanbook Extra [Simple Scans].zip"),
        "Extra"
    );
    assert_eq!(
        parse_special(
            "Gifting The Wonderful World With Blessings! - 3 Side Stories [yuNS][Unknown].epub"
        ),
        "Side Stories"
    );
}

#[test]
fn test_special_marker() {
    assert!(has_special_marker("Beastars SP01"));
    assert!(has_special_marker("Beastars_SP02_Omake"));
    assert!(!has_special_marker("Beastars Special 01"));
    assert!(!has_special_marker(""));
    assert_eq!(parse_special_index("Beastars SP12"), 12);
}

#[test]
fn test_parse_full_filename() {
    let parsed = parse("Dance in the Vampire Bund v16-17 (Digital) (NiceDragon)");
    assert_eq!(parsed.volume_range, Some(NumberRange::closed("16", "17")));
    assert_eq!(parsed.chapter_range, None);
    assert!(!parsed.is_special);

    let parsed = parse("Ani-Hina Art Collection.cbz");
    assert!(parsed.is_special);

    let parsed = parse("Beastars SP01");
    assert!(parsed.is_special);
    assert_eq!(parsed.volume_range, None);

    let parsed =
        parse("Corpse Party -The Anthology- Sachikos game of love Hysteric Birthday 2U Extra Chapter");
    assert!(parsed.is_special);
    assert_eq!(
        parsed.series_name,
        "Corpse Party -The Anthology- Sachikos game of love Hysteric Birthday 2U"
    );
    assert_eq!(
        parse_series("Corpse Party -The Anthology- Sachikos game of love Hysteric Birthday 2U Chapter 01"),
        "Corpse Party -The Anthology- Sachikos game of love Hysteric Birthday 2U"
    );
}

#[test]
fn test_parse_is_deterministic() {
    let names = [
        "Accel World Chapter 001 Volume 002",
        "Beelzebub_150-153b_RHS.zip",
        "Kebab Том 1 Глава 3",
        "Corpse Party -The Anthology- Sachikos game of love Hysteric Birthday 2U Extra Chapter",
    ];
    let parser = FilenameParser::new();
    for name in names {
        let first = parser.parse(name);
        for _ in 0..SHUFFLE_ROUNDS {
            assert_eq!(parser.parse(name), first, "'{}' parsed differently", name);
        }
        assert_eq!(parse(name), first);
    }

    let batch: Vec<&str> = names.iter().cycle().take(names.len() * 8).copied().collect();
    let parsed = parser.parse_many(&batch);
    for (name, result) in batch.iter().zip(&parsed) {
        assert_eq!(*result, parser.parse(name), "batch result for '{}'", name);
    }
}

#[test]
fn test_parse_many_preserves_order() {
    let names = vec![
        "Beelzebub_153b_RHS.zip".to_string(),
        "Gantz.V26.cbz".to_string(),
        random_name(12),
        "Noblesse - Episode 406 (52 Pages).7z".to_string(),
    ];
    let parsed = FilenameParser::new().parse_many(&names);
    assert_eq!(parsed.len(), names.len());
    assert_eq!(parsed[0].chapter_range, Some(NumberRange::single("153.5")));
    assert_eq!(parsed[1].volume_range, Some(NumberRange::single("26")));
    assert_eq!(parsed[3].chapter_range, Some(NumberRange::single("406")));
}

struct PathCase {
    path: &'static str,
    series: &'static str,
    volumes: &'static str,
    chapters: &'static str,
    edition: &'static str,
    is_special: bool,
}

#[test]
fn test_parse_path() -> Result<()> {
    let cases = [
        PathCase {
            path: "E:/Manga/Mujaki no Rakuen/Mujaki no Rakuen Vol12 ch76.cbz",
            series: "Mujaki no Rakuen",
            volumes: "12",
            chapters: "76",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: "E:/Manga/Shimoneta to Iu Gainen ga Sonzai Shinai Taikutsu na Sekai Man-hen/Vol 1.cbz",
            series: "Shimoneta to Iu Gainen ga Sonzai Shinai Taikutsu na Sekai Man-hen",
            volumes: "1",
            chapters: "0",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\Beelzebub\Beelzebub_01_[Noodles].zip",
            series: "Beelzebub",
            volumes: "0",
            chapters: "1",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\Ichinensei ni Nacchattara\Ichinensei_ni_Nacchattara_v01_ch01_[Taruby]_v1.1.zip",
            series: "Ichinensei ni Nacchattara",
            volumes: "1",
            chapters: "1",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\Tenjo Tenge (Color)\Tenjo Tenge {Full Contact Edition} v01 (2011) (Digital) (ASTC).cbz",
            series: "Tenjo Tenge",
            volumes: "1",
            chapters: "0",
            edition: "Full Contact Edition",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\Akame ga KILL! ZERO (2016-2019) (Digital) (LuCaZ)\Akame ga KILL! ZERO v01 (2016) (Digital) (LuCaZ).cbz",
            series: "Akame ga KILL! ZERO",
            volumes: "1",
            chapters: "0",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\Dorohedoro\Dorohedoro v01 (2010) (Digital) (LostNerevarine-Empire).cbz",
            series: "Dorohedoro",
            volumes: "1",
            chapters: "0",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\APOSIMZ\APOSIMZ 040 (2020) (Digital) (danke-Empire).cbz",
            series: "APOSIMZ",
            volumes: "0",
            chapters: "40",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\Corpse Party Musume\Kedouin Makoto - Corpse Party Musume, Chapter 09.cbz",
            series: "Kedouin Makoto - Corpse Party Musume",
            volumes: "0",
            chapters: "9",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: r"E:\Manga\Goblin Slayer\Goblin Slayer - Brand New Day 006.5 (2019) (Digital) (danke-Empire).cbz",
            series: "Goblin Slayer - Brand New Day",
            volumes: "0",
            chapters: "6.5",
            edition: "",
            is_special: false,
        },
        PathCase {
            path: "E:/Manga/Love Hina/Specials/Love Hina - Special.cbz",
            series: "Love Hina",
            volumes: "0",
            chapters: "0",
            edition: "",
            is_special: true,
        },
        PathCase {
            path: "E:/Manga/Beastars/Beastars SP01.cbz",
            series: "Beastars",
            volumes: "0",
            chapters: "0",
            edition: "",
            is_special: true,
        },
        PathCase {
            path: "E:/Manga/Beastars/Extras/Beastars_SP02_Omake.cbz",
            series: "Beastars",
            volumes: "0",
            chapters: "0",
            edition: "",
            is_special: true,
        },
    ];

    let parser = FilenameParser::new();
    for case in cases {
        let info = parser
            .parse_path(case.path, LIBRARY_ROOT)
            .ok_or_else(|| format!("no parse result for '{}'", case.path))?;
        assert_eq!(info.series, case.series, "series for '{}'", case.path);
        assert_eq!(info.volumes, case.volumes, "volumes for '{}'", case.path);
        assert_eq!(info.chapters, case.chapters, "chapters for '{}'", case.path);
        assert_eq!(info.edition, case.edition, "edition for '{}'", case.path);
        assert_eq!(info.is_special, case.is_special, "special for '{}'", case.path);
        assert_eq!(info.full_file_path, case.path);
        assert_eq!(info.format, MangaFormat::Archive);
    }

    Ok(())
}

#[test]
fn test_parse_path_special_index() -> Result<()> {
    let info = FilenameParser::new()
        .parse_path("E:/Manga/Beastars/Extras/Beastars_SP02_Omake.cbz", LIBRARY_ROOT)
        .ok_or("no parse result")?;
    assert_eq!(info.special_index, 2);
    assert_eq!(info.filename, "Beastars_SP02_Omake.cbz");
    assert!(info.is_special_info());
    Ok(())
}

#[test]
fn test_parse_path_images_use_folders() -> Result<()> {
    let parser = FilenameParser::new();

    let info = parser
        .parse_path("E:/Manga/Akame/Vol 02/page 01.jpg", LIBRARY_ROOT)
        .ok_or("no parse result")?;
    assert_eq!(info.series, "Akame");
    assert_eq!(info.volumes, "2");
    assert_eq!(info.chapters, "0");
    assert_eq!(info.format, MangaFormat::Image);

    assert!(parser.parse_path("E:/Manga/Akame/cover.jpg", LIBRARY_ROOT).is_none());
    Ok(())
}

#[test]
fn test_config_builder_validation() -> Result<()> {
    let result = ParserConfig::builder()
        .extra_volume_patterns(vec!["(".to_string()])
        .build();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Invalid extra_volume_patterns")
    );

    let result = ParserConfig::builder()
        .extra_chapter_patterns(vec![r"Episodio\s(?P<Volume>\d+)".to_string()])
        .build();
    assert!(result.unwrap_err().to_string().contains("missing named group"));

    let result = ParserConfig::builder().pad_width(0usize).build();
    assert!(result.is_err());

    let config = ParserConfig::builder()
        .natural_sort_direction(SortDirection::Descending)
        .specials_placement(SpecialsPlacement::First)
        .build()?;
    let parser = FilenameParser::with_config(config)?;
    assert_eq!(parser.natural_comparer().direction(), SortDirection::Descending);
    assert_eq!(parser.chapter_comparer().placement(), SpecialsPlacement::First);

    Ok(())
}
