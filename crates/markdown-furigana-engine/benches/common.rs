// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_annotated_content(size: usize) -> String {
    let base = "# {日本語|に|ほん|ご}の{練習|れん|しゅう}\n\n{今日|きょう}は{天気|てん|き}がいい。{公園|こう|えん}へ{行|い}きましょう。\n\n- {一|いち}\n- {二|に}\n- {三|さん}\n\n```\n{日|ひ} in code\n```\n\n";
    base.repeat(size)
}

/// Every line carries several annotations, the worst case for a rebuild.
#[allow(dead_code)]
pub fn generate_dense_lines(lines: usize) -> String {
    let line = "{漢字|かん|じ}と{仮名|か|な}と{振|ふ}り{仮名|が|な}\n";
    line.repeat(lines)
}
