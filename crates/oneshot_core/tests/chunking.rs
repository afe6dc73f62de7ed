use oneshot_core::{assemble_chunks, count_words, split_paragraphs, ChunkingConfig};

fn words(count: usize, tag: &str) -> String {
    (0..count)
        .map(|i| format!("{tag}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn paragraph_texts(input: &str) -> Vec<String> {
    split_paragraphs(input)
        .iter()
        .map(|p| p.as_str().to_string())
        .collect()
}

#[test]
fn rejoined_paragraphs_reproduce_input_modulo_blank_runs() {
    let cases = [
        ("one\n\ntwo", "one\n\ntwo"),
        ("\n\n  one\nline  \n\n\n\n two\n\n", "one\nline\n\ntwo"),
        ("a\n   \n\t\nb\nc\n\nd", "a\n\nb\nc\n\nd"),
        ("single", "single"),
    ];
    for (input, expected) in cases {
        assert_eq!(paragraph_texts(input).join("\n\n"), expected, "input: {input:?}");
    }
}

#[test]
fn two_large_paragraphs_form_exactly_one_chunk() {
    let text = format!("{}\n\n{}", words(220, "intro"), words(700, "body"));
    let chunks = assemble_chunks(split_paragraphs(&text), &ChunkingConfig::default());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].word_count(), 920);
    assert_eq!(chunks[0].paragraphs().len(), 2);
}

#[test]
fn three_short_paragraphs_merge_into_one_chunk() {
    let text = format!(
        "{}\n\n{}\n\n{}",
        words(30, "a"),
        words(40, "b"),
        words(50, "c")
    );
    let chunks = assemble_chunks(split_paragraphs(&text), &ChunkingConfig::default());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].word_count(), 120);
    assert_eq!(chunks[0].text(), text);
}

#[test]
fn every_chunk_but_last_meets_min_words_and_paragraphs_stay_whole() {
    let sizes = [150, 90, 400, 30, 610, 5, 260, 80, 700, 12, 199, 1];
    let paragraphs_src: Vec<String> = sizes
        .iter()
        .enumerate()
        .map(|(i, size)| words(*size, &format!("p{i}w")))
        .collect();
    let text = paragraphs_src.join("\n\n");

    for (min_words, target_words) in [(200, 800), (50, 100), (1, 1), (300, 300)] {
        let config = ChunkingConfig {
            min_words,
            target_words,
        };
        let chunks = assemble_chunks(split_paragraphs(&text), &config);
        assert!(!chunks.is_empty());

        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.word_count() >= min_words,
                "chunk with {} words below min {min_words}",
                chunk.word_count()
            );
        }

        let flattened: Vec<String> = chunks
            .iter()
            .flat_map(|chunk| chunk.paragraphs().iter().map(|p| p.as_str().to_string()))
            .collect();
        assert_eq!(flattened, paragraphs_src, "paragraph order or integrity changed");

        let total: usize = chunks.iter().map(|c| c.word_count()).sum();
        assert_eq!(total, count_words(&text));
    }
}

#[test]
fn blank_input_produces_no_chunks() {
    let chunks = assemble_chunks(split_paragraphs("\n \n\n"), &ChunkingConfig::default());
    assert!(chunks.is_empty());
}
