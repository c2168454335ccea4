use pretty_assertions::assert_eq;
use problem_forge::segmenter::{Diagnostic, RejectReason};
use problem_forge::{
    App, Config, ItemCode, Segmenter, SegmenterOptions, SplitService, SplitStrategy,
};
use std::collections::HashSet;
use std::sync::Arc;

const STEM: &str = "다음 글의 목적으로 가장 적절한 것은?";

const BODY: &[&str] = &[
    "Dear Hylean Miller,",
    "Hello, I'm Nelson Perkins, a teacher and swimming coach at Broomstone High School.",
    "Last week, I made a reservation for one of your company's swimming pools for our camp.",
    "However, thirty more students are coming to the camp than we expected this summer.",
    "The rental section on your website says that there are two other swimming pools.",
    "Please let me know if an additional rental would be possible. Thank you in advance.",
    "Best Wishes,",
    "Nelson Perkins",
];

/// 一道能通过过滤的题目：标记行 + 题干 + `body_lines` 行正文
fn problem(marker: &str, body_lines: usize) -> String {
    let mut lines = vec![marker.to_string(), STEM.to_string()];
    lines.extend(BODY.iter().take(body_lines).map(|s| s.to_string()));
    lines.join("\n")
}

fn item_code_segmenter() -> Segmenter {
    Segmenter::new(SegmenterOptions::default()).unwrap()
}

#[test]
fn test_numbered_strategy_keeps_preamble_and_dedups_codes() {
    let segmenter =
        Segmenter::new(SegmenterOptions::with_strategy(SplitStrategy::Numbered)).unwrap();
    let text = "Booklet header words here\n\
                2023학년도 6월 모의평가 18번\n\
                23005-0001\n\
                다음 글의 목적\n\
                18. This is a problem\n\
                23005-0001 again longer text here yes\n";

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let problems = segmenter.segment_with(text, &mut diagnostics);

    assert_eq!(
        problems,
        vec![
            "Booklet header words here".to_string(),
            "2023학년도 6월 모의평가 18번".to_string(),
            "23005-0001 again longer text here yes".to_string(),
            "18. This is a problem".to_string(),
        ]
    );
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::DuplicateCode {
            kept_chars: 38,
            discarded_chars: 20,
            ..
        }]
    ));
}

#[test]
fn test_numbered_strategy_drops_short_preamble() {
    let segmenter =
        Segmenter::new(SegmenterOptions::with_strategy(SplitStrategy::Numbered)).unwrap();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let problems = segmenter.segment_with("Header only\n18. This is a problem\n", &mut diagnostics);

    assert_eq!(problems, vec!["18. This is a problem".to_string()]);
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::Rejected {
            code: ItemCode::Numbered(1),
            reason: RejectReason::TooFewWords { words: 2, min: 2 },
        }]
    ));
}

#[test]
fn test_empty_input_yields_nothing() {
    let segmenter = item_code_segmenter();
    assert!(segmenter.segment("").is_empty());
    assert!(segmenter.segment("   ").is_empty());

    let numbered = Segmenter::new(SegmenterOptions::with_strategy(SplitStrategy::Numbered)).unwrap();
    assert!(numbered.segment("").is_empty());
    assert!(numbered.segment("   ").is_empty());
}

#[test]
fn test_scenario_a_simple_numbering() {
    let segmenter =
        Segmenter::new(SegmenterOptions::with_strategy(SplitStrategy::Numbered)).unwrap();
    let problems =
        segmenter.segment("18. This is the first problem.\n\n19. This is the second problem.");

    assert_eq!(
        problems,
        vec![
            "18. This is the first problem.".to_string(),
            "19. This is the second problem.".to_string(),
        ]
    );
}

#[test]
fn test_scenario_b_duplicate_code_keeps_longer() {
    let segmenter = item_code_segmenter();
    let short = problem("23005-0001", 4);
    let other = problem("23005-0002", 5);
    let long = problem("23005-0001", 8);
    let text = format!("{}\n{}\n{}\n", short, other, long);

    let problems = segmenter.segment(&text);

    assert_eq!(problems, vec![long, other]);
}

#[test]
fn test_scenario_c_boilerplate_after_five_lines() {
    let segmenter = item_code_segmenter();
    let head = problem("23005-0003", 3);
    assert_eq!(head.lines().count(), 5);

    let text = format!(
        "{}\n정답과 해설\n1 ④ 2 ② 3 ⑤\nreservation 예약\npopularity 인기\nadditional 추가의\nrental 대여\nin advance 미리\nswimming coach 수영 코치\n{}",
        head,
        problem("23005-0004", 6)
    );

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let problems = segmenter.segment_with(&text, &mut diagnostics);

    assert_eq!(problems.len(), 2);
    assert_eq!(problems[0], head);
    assert!(diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::BoilerplateCut { code: ItemCode::Canonical(c), retained_lines: 5, .. }
            if c == "23005-0003"
    )));
}

#[test]
fn test_scenario_d_short_segment_without_keyword_dropped() {
    let segmenter = item_code_segmenter();
    let filler = "The quick brown fox jumps over the lazy dog again and again. ";
    let mut segment = format!("23005-0005\n{}", filler.repeat(5));
    segment.truncate(250);
    assert_eq!(segment.chars().count(), 250);

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    assert!(segmenter.segment_with(&segment, &mut diagnostics).is_empty());
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::Rejected {
            reason: RejectReason::TooShort { min: 300, .. },
            ..
        }]
    ));
}

#[test]
fn test_long_segment_without_keyword_dropped() {
    let segmenter = item_code_segmenter();
    let filler = "The quick brown fox jumps over the lazy dog again and again. ";
    let segment = format!("23005-0007\n{}", filler.repeat(6));
    assert!(segment.trim().chars().count() > 300);

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    assert!(segmenter.segment_with(&segment, &mut diagnostics).is_empty());
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::Rejected {
            code: ItemCode::Canonical(code),
            reason: RejectReason::MissingKeyword { window: 300 },
        }] if code == "23005-0007"
    ));
}

#[test]
fn test_scenario_e_short_coded_block_excluded() {
    let segmenter = item_code_segmenter();
    let text = format!("23005-0006\n{}\nDear Ms. Kim, short note.", STEM);
    assert!(text.chars().count() < 300);

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    assert!(segmenter.segment_with(&text, &mut diagnostics).is_empty());
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::Rejected {
            reason: RejectReason::TooShort { min: 300, .. },
            ..
        }]
    ));
}

#[test]
fn test_scenario_f_exercises_get_synthetic_codes() {
    let segmenter = item_code_segmenter();
    let text = format!(
        "{}\n{}\n{}\n",
        problem("Exercises", 6),
        problem("23005-0007", 6),
        problem("Exercises", 7)
    );

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let codes: Vec<String> = segmenter
        .segment_blocks(&text, &mut diagnostics)
        .into_iter()
        .map(|block| block.code.to_string())
        .collect();

    assert_eq!(codes, vec!["EXERCISE_001", "23005-0007", "EXERCISE_002"]);
}

#[test]
fn test_output_is_deterministic_unique_and_ordered() {
    let segmenter = item_code_segmenter();
    let text = format!(
        "수능특강\n영어영역 영어\n{}\n{}\n{}\n{}\n",
        problem("23005-0012", 6),
        problem("23005-0010", 6),
        problem("23005-0012", 7),
        problem("23005-0011", 6)
    );

    let first = segmenter.segment(&text);
    let second = segmenter.segment(&text);
    assert_eq!(first, second);

    let leading: Vec<&str> = first.iter().map(|p| &p[..10]).collect();
    assert_eq!(leading, vec!["23005-0012", "23005-0010", "23005-0011"]);

    let unique: HashSet<&str> = leading.iter().copied().collect();
    assert_eq!(unique.len(), leading.len());
}

#[test]
fn test_page_numbers_and_footers_are_removed() {
    let segmenter = item_code_segmenter();
    let text = format!(
        "{}\n12\n수능특강\n{}\n",
        problem("23005-0020", 3),
        BODY[4]
    );

    let problems = segmenter.segment(&text);
    assert_eq!(problems.len(), 1);
    assert!(!problems[0].lines().any(|line| line == "12" || line == "수능특강"));
    assert!(problems[0].ends_with(BODY[4]));
}

#[test]
fn test_original_booklet_sample() {
    let sample = "
수능특강
영어영역 영어

이 책의 구성과 특징 Structure

Gateway
2023학년도 6월 모의평가 18번
23005-0001
다음 글의 목적으로 가장 적절한 것은?
Dear Hylean Miller,
Hello, I'm Nelson Perkins, a teacher and swimming coach at Broomstone High
School. Last week, I made a reservation for one of your company's swimming pools
for our summer swim camp. However, due to its popularity, thirty more students are
coming to the camp than we expected, so we need one more swimming pool for them.
The rental section on your website says that there are two other swimming pools
during the summer season: the Splash Pool and the Rainbow Pool. Please let me know
if an additional rental would be possible. Thank you in advance.
Best Wishes,
Nelson Perkins
① 수영 캠프 참가 날짜를 변경하려고
② 수영장 수용 가능 인원을 확인하려고
③ 수영 캠프 등록 방법에 대해 알아보려고
④ 수영장 추가 대여 가능 여부를 문의하려고
⑤ 수영장 대여 취소에 따른 환불을 요청하려고

Exercises
다음 글의 목적으로 가장 적절한 것은?
23005-0002
Dear Blue Light Theater,
Every year the Modern Art Association holds an awards night to honor accomplished
artists in our state. For this year's program, we are featuring new and progressive artistic
groups like yours.
① 새로 발매된 앨범을 광고하려고
② 수상자로 선정된 것을 알리려고
";

    let segmenter = item_code_segmenter();
    let report = segmenter.report(sample);

    let codes: Vec<String> = report.problems.iter().map(|p| p.code.to_string()).collect();
    assert_eq!(codes, vec!["23005-0001"]);
    assert!(report.problems[0].text.starts_with("23005-0001\n다음 글의 목적으로"));
    assert!(report.problems[0].text.ends_with("⑤ 수영장 대여 취소에 따른 환불을 요청하려고"));

    // 前言较短，不会被标记；Exercises 与 23005-0002 都太短
    assert!(!report
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnmarkedSegment { .. })));
    let rejected: Vec<String> = report
        .diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::Rejected { code, .. } => Some(code.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(rejected, vec!["EXERCISE_001", "23005-0002"]);
}

#[test]
fn test_garbage_input_does_not_panic() {
    let segmenter = item_code_segmenter();
    let garbage = "\u{0}\u{1}\u{FFFD}\u{FFFD}23005-\u{7f}0001\r\n\r\nExercises\r\n\u{200b}12345-6789";
    let _ = segmenter.segment(garbage);

    let numbered = Segmenter::new(SegmenterOptions::with_strategy(SplitStrategy::Numbered)).unwrap();
    let _ = numbered.segment(garbage);
}

#[test]
fn test_concurrent_calls_share_one_segmenter() {
    let segmenter = Arc::new(item_code_segmenter());
    let text = Arc::new(format!(
        "{}\n{}\n",
        problem("23005-0030", 6),
        problem("Exercises", 6)
    ));
    let expected = segmenter.segment(&text);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let segmenter = segmenter.clone();
            let text = text.clone();
            std::thread::spawn(move || segmenter.segment(&text))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_split_service_contract() {
    let service = SplitService::new(Arc::new(item_code_segmenter()));

    let body = serde_json::json!({ "text": problem("23005-0040", 6) }).to_string();
    let response = service.handle_json(&body).unwrap();
    assert_eq!(response.problems.len(), 1);

    let err = service.handle_json(r#"{"content": "x"}"#).unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert!(err.to_body()["detail"].is_string());
}

#[tokio::test]
async fn test_batch_run_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir_all(&input).unwrap();

    std::fs::write(
        input.join("booklet.txt"),
        format!("수능특강\n{}\n{}\n", problem("23005-0050", 6), problem("Exercises", 6)),
    )
    .unwrap();
    std::fs::write(
        input.join("request.json"),
        serde_json::json!({ "text": problem("23005-0051", 6) }).to_string(),
    )
    .unwrap();
    std::fs::write(input.join("blank.txt"), "   \n").unwrap();
    std::fs::write(input.join("missing.json"), "{}").unwrap();

    let path = |name: &str| dir.path().join(name).to_string_lossy().to_string();
    let config = Config {
        max_concurrent_documents: 2,
        input_folder: input.to_string_lossy().to_string(),
        output_folder: path("output"),
        warn_file: path("warn.txt"),
        output_log_file: path("output.txt"),
        ..Config::default()
    };

    let stats = App::initialize(config).await.unwrap().run().await.unwrap();

    assert_eq!(stats.total, 4);
    assert_eq!(stats.success, 3);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.problems, 3);

    let report: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("output/booklet.problems.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["problems"][0]["code"], "23005-0050");
    assert_eq!(report["problems"][1]["code"], "EXERCISE_001");

    assert!(dir.path().join("output/request.problems.json").exists());

    let warn = std::fs::read_to_string(dir.path().join("warn.txt")).unwrap();
    assert!(warn.contains("blank"));
    assert!(!warn.contains("booklet"));

    let log = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert!(log.contains("booklet: 2 道题目"));
    let booklet_line = log.lines().find(|line| line.contains("booklet:")).unwrap();
    assert!(booklet_line.contains("诊断"));
    assert!(booklet_line.ends_with("booklet.problems.json"));
    assert!(log.contains("missing: 失败"));
}
