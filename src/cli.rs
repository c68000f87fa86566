use clap::{arg, crate_version, Arg, ArgAction, Command, ValueHint};

const FILE_AS_HELP: &str = "either `FILE` alone, or `FILE as FILE2` to use a different name on the \
other side";

pub fn build_cli() -> Command {
    let long_help = "msxdsk manipulates MSX-DOS 720 KB floppy disk images.
It is always invoked as `msxdsk IMAGE SUBCOMMAND [args...]`.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
Create an image:      `msxdsk new.dsk create hello.bas data.dat`
List files:            `msxdsk new.dsk ls`
Extract a file:         `msxdsk new.dsk get HELLO.BAS as hello.bas`
Insert or replace:      `msxdsk new.dsk put hello.bas`
Detokenize to stdout:   `msxdsk new.dsk cat HELLO.BAS`
Remove a file:          `msxdsk new.dsk rm HELLO.BAS`";

    let mut main_cmd = Command::new("msxdsk")
        .about("Manipulates MSX-DOS 720 KB floppy disk images and MSX-BASIC source.")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(
            arg!([IMAGE] "path to the 720 KB disk image")
                .value_hint(ValueHint::FilePath)
                .required(false),
        )
        .subcommand_required(false);

    main_cmd = main_cmd.subcommand(
        Command::new("info").about("print boot sector fields and a per-file cluster summary"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("ls")
            .visible_alias("dir")
            .about("print the directory listing"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("get")
            .visible_alias("cp")
            .arg(Arg::new("args").num_args(1..=3).required(true))
            .about("extract one file to the local filesystem")
            .after_help(FILE_AS_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("put")
            .visible_alias("wt")
            .arg(Arg::new("args").num_args(1..=3).required(true))
            .about("insert or replace one file, tokenizing .BAS sources")
            .after_help(FILE_AS_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("cat")
            .arg(arg!(<FILE> "on-disk file name"))
            .about("stream a file to stdout, detokenizing .BAS files"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("rm")
            .visible_alias("del")
            .visible_alias("delete")
            .arg(arg!(<FILE> "on-disk file name"))
            .about("remove one file and rewrite the image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("create")
            .arg(Arg::new("files").num_args(0..).action(ArgAction::Append))
            .about("build a fresh image containing the given local files"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(
                Arg::new("shell")
                    .required(true)
                    .value_parser(["bash", "elv", "fish", "ps1", "zsh"]),
            )
            .about("print a shell completion script to stdout"),
    );
    main_cmd
}
