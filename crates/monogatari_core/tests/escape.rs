use monogatari_core::{escape, unescape};

#[test]
fn escape_replaces_the_five_reserved_characters() {
    assert_eq!(
        escape(r#"a & b < c > "d" 'e'"#),
        "a &amp; b &lt; c &gt; &quot;d&quot; &apos;e&apos;"
    );
}

#[test]
fn unescape_reverses_escape_including_literal_entities() {
    let samples = [
        "plain",
        "&amp;",
        "&lt;Type&gt;",
        "Tom & Jerry's \"show\"",
        "物語 <第一章> & ✨",
        "",
    ];
    for sample in samples {
        assert_eq!(unescape(&escape(sample)), sample, "sample {sample:?}");
    }
}

#[test]
fn existing_entities_are_not_double_unescaped() {
    assert_eq!(escape("&amp;"), "&amp;amp;");
    assert_eq!(unescape("&amp;amp;"), "&amp;");
}

#[test]
fn unknown_entities_are_left_alone() {
    assert_eq!(unescape("&copy; &lt;"), "&copy; <");
}
