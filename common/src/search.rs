use crate::Job;

/// Returns true when the lowercased `term` occurs in the job's title,
/// company, job type, any tag or any location.
fn matches(job: &Job, term: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(term);

    contains(&job.title)
        || contains(&job.company)
        || contains(&job.job_type)
        || job.tags.iter().any(|tag| contains(tag))
        || job.locations.iter().any(|location| contains(location))
}

/// Case-insensitive local search over a job listing. An empty query keeps
/// every job; order is preserved.
pub fn filter_jobs<'a>(jobs: &'a [Job], query: &str) -> Vec<&'a Job> {
    let term = query.to_lowercase();
    jobs.iter().filter(|job| matches(job, &term)).collect()
}
