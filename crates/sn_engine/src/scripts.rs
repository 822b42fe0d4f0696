//! Diagnostic script generation.
//!
//! Snippets are text for an operator to read, adapt and run by hand. Article
//! fields are interpolated verbatim (no escaping), since nothing here executes
//! the result.

use sn_core::{Article, ScriptLanguage, ScriptSnippet, SecurityTag, SecurityTags, TechTag, TechTags};

/// Everything a script rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct ScriptContext<'a> {
    pub article: &'a Article,
    pub security: &'a SecurityTags,
    pub tech: &'a TechTags,
}

impl ScriptContext<'_> {
    fn has_any_security(&self, tags: &[SecurityTag]) -> bool {
        tags.iter().any(|tag| self.security.contains(tag))
    }
}

#[derive(Clone, Copy)]
pub enum ScriptBody {
    Static(&'static str),
    Template(fn(&Article) -> String),
}

impl ScriptBody {
    fn render(&self, article: &Article) -> String {
        match self {
            ScriptBody::Static(text) => text.trim().to_string(),
            ScriptBody::Template(render) => render(article).trim().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct ScriptRule {
    pub name: &'static str,
    pub language: ScriptLanguage,
    pub when: fn(&ScriptContext<'_>) -> bool,
    pub body: ScriptBody,
}

impl ScriptRule {
    pub fn snippet(&self, article: &Article) -> ScriptSnippet {
        ScriptSnippet {
            name: self.name.to_string(),
            language: self.language,
            body: self.body.render(article),
        }
    }
}

const WINDOWS_PROCESS_HUNT: &str = r#"
Get-WmiObject Win32_Process |
  Where-Object { $_.Path -and ($_.Path -like "*AppData*" -or $_.Path -like "*Temp*") } |
  Select-Object ProcessId, Name, Path

Get-CimInstance Win32_StartupCommand |
  Select-Object Name, Command, Location
"#;

const LINUX_PROCESS_HUNT: &str = r#"
ps aux | egrep "crypto|minerd|xmrig|kdevtmpfsi" | grep -v egrep || echo "No obvious miners found"

find / -xdev -type f -perm -4000 2>/dev/null
"#;

const S3_EXPOSURE_CHECK: &str = r#"
# Requires configured AWS CLI with permissions to list and read S3 ACLs
aws s3api list-buckets --query "Buckets[].Name" --output text | tr '\t' '\n' | while read B; do
  echo "Bucket: $B"
  aws s3api get-bucket-acl --bucket "$B" --query "Grants[].Grantee.URI" --output text 2>/dev/null |
    egrep "AllUsers|AuthenticatedUsers" && echo "  [!] Bucket may be publicly accessible"
done
"#;

const SSH_AUTH_REVIEW: &str = r#"
# Example SSH log review (adjust paths for your system)
grep -i "sshd" /var/log/auth.log /var/log/messages* 2>/dev/null | egrep "Failed|Accepted"
"#;

const M365_SIGNIN_SEARCH: &str = r#"
# Requires Exchange Online / Security & Compliance modules and permissions to read audit logs
Search-UnifiedAuditLog -StartDate (Get-Date).AddDays(-3) -EndDate (Get-Date) -Operations UserLoggedIn |
  Where-Object { $_.ClientIP -notlike "YOUR_TRUSTED_RANGE*" } |
  Select-Object UserId, ClientIP, Operation, CreationDate
"#;

/// Token the operator replaces with indicators taken from the article.
pub const FALLBACK_PLACEHOLDER: &str = "PATTERN";

pub const FALLBACK_SCRIPT: ScriptRule = ScriptRule {
    name: "Generic: search for IOCs from the article across logs",
    language: ScriptLanguage::Bash,
    when: always,
    body: ScriptBody::Static(
        r#"
# Replace PATTERN with domains/IPs/URLs or other indicators extracted from the article:
grep -Ei "PATTERN" /var/log/* 2>/dev/null || echo "No hits for pattern"
"#,
    ),
};

fn always(_: &ScriptContext<'_>) -> bool {
    true
}

fn web_log_grep(article: &Article) -> String {
    format!(
        "# Replace access.log paths with your actual web server logs\n\
         grep -i \"{}\" /var/log/nginx/access.log* /var/log/apache2/access.log* 2>/dev/null || echo \"No hits for indicator\"",
        article.url
    )
}

fn is_compromise(ctx: &ScriptContext<'_>) -> bool {
    ctx.has_any_security(&[SecurityTag::Ransomware, SecurityTag::Malware, SecurityTag::DataBreach])
}

fn is_vulnerability_with_url(ctx: &ScriptContext<'_>) -> bool {
    ctx.security.contains(&SecurityTag::Vulnerability) && !ctx.article.url.is_empty()
}

fn is_cloud(ctx: &ScriptContext<'_>) -> bool {
    ctx.tech.contains(&TechTag::Cloud)
}

fn is_vmware(ctx: &ScriptContext<'_>) -> bool {
    ctx.tech.contains(&TechTag::VMware)
}

fn is_identity_attack(ctx: &ScriptContext<'_>) -> bool {
    ctx.has_any_security(&[SecurityTag::Phishing, SecurityTag::AccountTakeover])
}

pub const SCRIPT_RULES: &[ScriptRule] = &[
    ScriptRule {
        name: "PowerShell: hunt for suspicious processes and autoruns",
        language: ScriptLanguage::PowerShell,
        when: is_compromise,
        body: ScriptBody::Static(WINDOWS_PROCESS_HUNT),
    },
    ScriptRule {
        name: "Linux: hunt for suspicious processes and SUID binaries",
        language: ScriptLanguage::Bash,
        when: is_compromise,
        body: ScriptBody::Static(LINUX_PROCESS_HUNT),
    },
    ScriptRule {
        name: "Search for requests related to this article URL in web logs (Linux)",
        language: ScriptLanguage::Bash,
        when: is_vulnerability_with_url,
        body: ScriptBody::Template(web_log_grep),
    },
    ScriptRule {
        name: "AWS CLI: basic public S3 bucket exposure check",
        language: ScriptLanguage::Bash,
        when: is_cloud,
        body: ScriptBody::Static(S3_EXPOSURE_CHECK),
    },
    ScriptRule {
        name: "ESXi / Linux: review SSH authentication attempts",
        language: ScriptLanguage::Bash,
        when: is_vmware,
        body: ScriptBody::Static(SSH_AUTH_REVIEW),
    },
    ScriptRule {
        name: "M365: search for suspicious sign\u{2011}ins in unified audit log",
        language: ScriptLanguage::PowerShell,
        when: is_identity_attack,
        body: ScriptBody::Static(M365_SIGNIN_SEARCH),
    },
];

/// Snippets of every rule that fires, in table order. Never empty: when no
/// rule fires the generic IOC search is returned on its own.
pub fn generate_scripts(article: &Article, security: &SecurityTags, tech: &TechTags) -> Vec<ScriptSnippet> {
    let ctx = ScriptContext { article, security, tech };

    let mut scripts: Vec<ScriptSnippet> = SCRIPT_RULES
        .iter()
        .filter(|rule| (rule.when)(&ctx))
        .map(|rule| rule.snippet(article))
        .collect();

    if scripts.is_empty() {
        scripts.push(FALLBACK_SCRIPT.snippet(article));
    }
    scripts
}
