use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
type STDRESULT = Result<(), Box<dyn std::error::Error>>;

#[test]
fn empty_image_create_matches_synthesized_layout() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("x.dsk");
    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("create").assert().success();

    let bytes = fs::read(&dimg_path)?;
    assert_eq!(bytes.len(), 737_280);
    assert_eq!(&bytes[0x00..0x03], &[0xEB, 0xFE, 0x90]);
    assert_eq!(&bytes[0x0B..0x0D], &[0x00, 0x02]);
    // FAT copy 0 starts at sector 1.
    assert_eq!(bytes[512], 0xF9);
    assert_eq!(&bytes[513..515], &[0xFF, 0xFF]);
    // directory starts at sector 7.
    assert_eq!(bytes[7 * 512], 0x00);
    Ok(())
}

#[test]
fn round_trip_ls_shows_created_file() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("x.dsk");
    let local_path = dir.path().join("HELLO.TXT");
    fs::write(&local_path, "A".repeat(100))?;

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("create").arg(&local_path).assert().success();

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("HELLO.TXT"))
        .stdout(predicate::str::contains("100 bytes"))
        .stdout(predicate::str::contains("C:2"))
        .stdout(predicate::str::contains("S:12"));
    Ok(())
}

#[test]
fn put_then_cat_detokenizes_bas_file() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("x.dsk");
    let local_path = dir.path().join("GREET.BAS");
    {
        let mut f = fs::File::create(&local_path)?;
        write!(f, "10 PRINT \"HI\"\n")?;
    }

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("create").assert().success();

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("put").arg(&local_path).assert().success();

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path)
        .arg("cat")
        .arg("GREET.BAS")
        .assert()
        .success()
        .stdout("10 PRINT \"HI\"\n");
    Ok(())
}

#[test]
fn get_roundtrips_a_put_file_byte_for_byte() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("x.dsk");
    let local_path = dir.path().join("DATA.DAT");
    fs::write(&local_path, [1u8, 2, 3, 4, 5])?;

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("create").arg(&local_path).assert().success();

    let out_path = dir.path().join("roundtrip.dat");
    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path)
        .arg("get")
        .arg("DATA.DAT")
        .arg("as")
        .arg(&out_path)
        .assert()
        .success();

    assert_eq!(fs::read(&out_path)?, vec![1u8, 2, 3, 4, 5]);
    Ok(())
}

#[test]
fn rm_removes_a_file_from_the_listing() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("x.dsk");
    let local_path = dir.path().join("BYE.TXT");
    fs::write(&local_path, "gone soon")?;

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("create").arg(&local_path).assert().success();

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("rm").arg("BYE.TXT").assert().success();

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("BYE.TXT").not());
    Ok(())
}

#[test]
fn wrong_size_image_exits_2() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("bad.dsk");
    fs::write(&dimg_path, vec![0u8; 1000])?;

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("info").assert().failure().code(2);
    Ok(())
}

#[test]
fn missing_file_exits_4() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("x.dsk");

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("create").assert().success();

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).arg("cat").arg("NOPE.TXT").assert().failure().code(4);
    Ok(())
}

#[test]
fn no_subcommand_exits_1() -> STDRESULT {
    let dir = tempfile::tempdir()?;
    let dimg_path = dir.path().join("x.dsk");

    let mut cmd = cargo::cargo_bin_cmd!("msxdsk");
    cmd.arg(&dimg_path).assert().failure().code(1);
    Ok(())
}
