//! Built-in sample programs. The last few fail on purpose.

pub const SAMPLES: &[&[&str]] = &[
    &["#", "5"],
    &["#", "_", "5"],
    &["#", "%", "5"],
    &["#", "%", "25"],
    &["#", "+", "5", "25"],
    &["#", "-", "5", "25"],
    &["#", "*", "25", "5"],
    &["#", "/", "25", "5"],
    &[":=", "x", "55"],
    &[
        ":=", "able", "77",
        ":=", "baker", "3",
        ":=", "charlie", "/", "able", "baker",
    ],
    &[
        ":=", "a", "3",
        ":=", "b", "4",
        ":=", "c", "5",
        ":=", "result", "+", "*", "b", "b", "_", "*", "*", "4", "a", "c",
    ],
    &[
        ":=", "x", "1",
        ":=", "x", "+", "x", "x",
        ":=", "x", "*", "+", "x", "x", "x",
        "#", "x",
        ":=", "x", "-", "2", "_", "x",
        ":=", "x", "/", "x", "-2",
        ":=", "Leicester", "%", "+", "19", "x",
        "#", "Leicester",
    ],
    &[
        ":=", "a", "1",
        ":=", "b", "_", "1",
        ":=", "c", "_", "6",
        ":=", "root", "/", "+", "_", "b", "%", "-", "*", "b", "b", "*", "*", "4", "a", "c", "*",
        "2", "a",
        ":=", "root2", "/", "-", "_", "b", "%", "-", "*", "b", "b", "*", "*", "4", "a", "c", "*",
        "2", "a",
    ],
    &["#", "/", "5", "0"],
    &[":=", "42", "+", "5", "0"],
    &["#", "abracadabra"],
    &[":=", "x", "9", "+", "7", "9"],
    &[":=", "x", "9", ":="],
    &[":=", "y"],
    &[":=", "x", "9", "%"],
];

pub fn sample(index: usize) -> Option<&'static [&'static str]> {
    SAMPLES.get(index).copied()
}
