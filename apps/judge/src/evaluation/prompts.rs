// All LLM prompt templates for evaluation.
// Reuses cross-cutting fragments from llm_client::prompts via {format_alert},
// {judge_persona}, {reviewer_greeting} and {minimum_score_line}.

/// Individual applicant template.
/// Replace: {first_name}, {company}, {title}, {chosen_track}, {motivation},
///          {skills}, {past_projects}, {post_event_interest}, {post_event_interest_other},
///          {github_url}, {github_username}, {github_name}, {github_bio},
///          {github_repo_count}, {github_followers}, {github_repo}, {repo_name},
///          {repo_language}, {repo_stars}, {repo_forks}, {repo_watchers},
///          {repo_commit_count}, {repo_last_commit}, {repo_readme_file}, {repo_readme}
pub const APPLICANT_PROMPT_TEMPLATE: &str = r#"{format_alert}

MANDATORY FORMAT - FOLLOW EXACTLY:

Line 1: Score: [number]/100
Line 2:
Line 3: Feedback: {reviewer_greeting}
Line 4: [Your assessment of the applicant in detail. Mention their strengths/weaknesses and explain the score]
Line 5:
Line 6: Recommendation: [Select/Waitlist]

EXAMPLE:
Score: 75/100

Feedback: {reviewer_greeting}
This applicant shows solid motivation and some decent technical grounding, especially in Python and React. Their GitHub profile has moderate activity and a couple of relevant repos, though nothing groundbreaking. The project repo linked is basic but functional...

Recommendation: Waitlist

---

{judge_persona}

Evaluate the applicant based on the details provided below. Justify your score using observable evidence (motivation, GitHub activity, skills, project quality, etc.). Be objective, concise, and clear.

🎯 SPECIAL WEIGHTING GUIDELINE (IMPORTANT):
The applicant's selected motivation carries weight in scoring. Prioritize applicants based on this internal ranking (top to bottom = most preferred):
1. "I'm using this hackathon to explore an idea I eventually want to turn into a startup."
2. "I'm finally exploring an idea I've been thinking about for a while."
3. "I'm here to have fun, learn new things, and collaborate with other builders."
4. "I want to gain experience working with cutting-edge tech and get access to mentors."
5. "I'm building my portfolio or resume with a cool project."

For example, applicants who chose Option 1 should receive higher scores than those who chose Option 5. Factor this into your evaluation and final score.

SCORING GUIDELINES:
- 90-100: Outstanding (strong skills, great motivation, impressive project)
- 80-89: Strong candidate
- 70-79: Good candidate
- 60-69: Average candidate
- 50-59: Below average
- 30-49: Poor (but shows some effort)
{minimum_score_line}

APPLICANT: {first_name}
Company: {company}
Title: {title}
Track: {chosen_track}

Motivation: {motivation}
Skills: {skills}
Projects: {past_projects}
Continue after hackathon: {post_event_interest} or {post_event_interest_other}

GitHub Profile: {github_url}
- Username: {github_username}
- Display Name: {github_name}
- Bio: {github_bio}
- Repos: {github_repo_count}
- Followers: {github_followers}

GitHub Project: {github_repo}
- Name: {repo_name}
- Language: {repo_language}
- Stars: {repo_stars}
- Forks: {repo_forks}
- Watchers: {repo_watchers}
- Commit Count: {repo_commit_count}
- Last Commit: {repo_last_commit}
- README ({repo_readme_file}):
{repo_readme}

RESPOND EXACTLY AS SHOWN ABOVE. START WITH "Score: [number]/100""#;

/// Team template.
/// Replace: {team_name}, {chosen_track}, {team_size}, {average_score}, {members}
pub const TEAM_PROMPT_TEMPLATE: &str = r#"{format_alert}

MANDATORY FORMAT - FOLLOW EXACTLY:

Line 1: Team Score: [number]/100
Line 2:
Line 3: Team Feedback: {reviewer_greeting}
Line 4: [Your assessment of the team in detail. Mention their strengths/weaknesses and explain the score]
Line 5:
Line 6: Recommendation: [Select/Waitlist]

EXAMPLE:
Team Score: 82/100

Team Feedback: {reviewer_greeting}
Team {team_name} shows excellent potential...

Recommendation: Select

---

{judge_persona}
You are evaluating a TEAM APPLICATION. Consider team dynamics, skill complementarity, collective motivation, and potential for collaboration.

TEAM SCORING GUIDELINES:
- 90-100: Outstanding team (diverse skills, strong synergy, clear vision)
- 80-89: Strong team (good skill mix, solid motivation)
- 70-79: Good team (decent skills, some complementarity)
- 60-69: Average team (basic skills, unclear synergy)
- 50-59: Below average team (limited skill diversity)
- 30-49: Poor team (weak skills, poor fit)
{minimum_score_line}

TEAM: {team_name}
Track: {chosen_track}
Team Size: {team_size} members
Average Individual Score: {average_score}

{members}

EVALUATION CRITERIA:
1. SKILL COMPLEMENTARITY: Do members have complementary technical skills?
2. TEAM SYNERGY: Do their motivations align? Will they work well together?
3. TRACK FIT: Are their combined skills suitable for the chosen track? Note: this is not a hard rule.

Consider:
- Skill gaps and overlaps
- Leadership potential
- Communication and teamwork indicators
- Project execution capability
- Innovation potential as a team

RESPOND EXACTLY AS SHOWN ABOVE. START WITH "Team Score: [number]/100""#;

/// One member block inside the team template.
/// Replace: {index}, {name}, {individual_score}, {motivation}, {skills}
pub const TEAM_MEMBER_TEMPLATE: &str = r#"MEMBER {index}: {name}
Individual Score: {individual_score}
Motivation: {motivation}
Skills: {skills}"#;
