/// Directory name of the Berry package inside a PlatformIO libdeps environment.
pub const LIBDEPS_PACKAGE: &str = "berry";

/// Repository-local submodule location, relative to the project root.
pub const COMPONENT_PATH: [&str; 3] = ["components", "berry_lang", "berry-lang"];

pub const GENERATE_DIR: &str = "generate";

/// Emitted by `coc`; its presence means generation already ran.
pub const MARKER_FILENAME: &str = "be_const_strtab.h";

pub const COC_TOOL_PATH: [&str; 3] = ["tools", "coc", "coc"];

/// Berry configuration header, relative to the project source directory.
pub const CONFIG_HEADER_PATH: [&str; 2] = ["berry", "berry_conf.h"];

pub const SOURCE_SUBDIR: &str = "src";
pub const DEFAULT_SUBDIR: &str = "default";

/// PlatformIO variables exported to pre-build scripts.
pub mod vars {
  pub const PROJECT_DIR: &str = "PROJECT_DIR";
  pub const PROJECT_LIBDEPS_DIR: &str = "PROJECT_LIBDEPS_DIR";
  pub const PIOENV: &str = "PIOENV";
  pub const PROJECT_SRC_DIR: &str = "PROJECT_SRC_DIR";
}
