use indicatif::{ProgressBar, ProgressStyle};

pub struct ProgressReporter {
    pb: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total_work: u64, title: &str) -> Self {
        let pb = ProgressBar::new(total_work);
        let template =
            format!("{}: ", title) + "[{wide_bar}] {pos}/{len} ({elapsed_precise}|{eta_precise})";
        pb.set_style(
            ProgressStyle::with_template(&template)
                .unwrap()
                .progress_chars("=> "),
        );
        pb.tick();
        ProgressReporter { pb }
    }

    pub fn inc(&self, num: u64) {
        if num != 0 {
            self.pb.inc(num);
        }
    }

    pub fn done(&self) {
        self.pb.finish();
    }
}
