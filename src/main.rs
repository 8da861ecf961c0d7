fn main() -> anyhow::Result<()> {
    proseprobe_lib::run()
}
