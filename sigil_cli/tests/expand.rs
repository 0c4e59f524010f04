mod common;

use sigil_core::AnyEmptyResult;

#[test]
fn expand_prints_the_result_to_stdout() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("theme.sig"), ".a{color:$color}")?;
	std::fs::write(tmp.path().join("tokens.toml"), "color = \"blue\"\n")?;

	let mut cmd = common::sigil_cmd();
	cmd.current_dir(tmp.path())
		.arg("expand")
		.arg("theme.sig")
		.arg("--map")
		.arg("tokens.toml")
		.assert()
		.success()
		.stdout(".a{color:blue}");

	Ok(())
}

#[test]
fn expand_reads_stdin_with_a_dash() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("tokens.toml"), "color = \"blue\"\n")?;

	let mut cmd = common::sigil_cmd();
	cmd.current_dir(tmp.path())
		.arg("expand")
		.arg("-")
		.arg("--map")
		.arg("tokens.toml")
		.write_stdin("p: $color;")
		.assert()
		.success()
		.stdout("p: blue;");

	Ok(())
}

#[test]
fn expand_fails_for_a_missing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::sigil_cmd();
	cmd.current_dir(tmp.path())
		.arg("expand")
		.arg("nope.sig")
		.assert()
		.failure();

	Ok(())
}
